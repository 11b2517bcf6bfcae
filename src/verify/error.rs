//! Error types for verification checks.
//!
//! Every variant is caught by the harness and turned into a failed
//! outcome; none of them abort a run.

use thiserror::Error;

use crate::hardcover::FetchError;
use crate::http_client::ClientBuildError;

/// Errors that fail a single verification check.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The local API could not be reached.
    #[error("cannot reach {url}: {source}\n  Suggestion: Is the local API running?")]
    Transport {
        /// Requested URL
        url: String,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// The local API answered with a non-2xx status.
    #[error("HTTP {status} from {url}")]
    Http {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The response did not have the expected shape.
    #[error("unexpected response from {url}: {reason}")]
    Shape {
        /// Requested URL
        url: String,
        /// What was wrong with it
        reason: String,
    },

    /// A verified property did not hold.
    #[error("invariant violated: {reason}")]
    InvariantViolation {
        /// Which assertion failed, with the offending values
        reason: String,
    },

    /// Configuration needed by the check is missing or invalid.
    #[error("{reason}\n  Suggestion: {suggestion}")]
    Config {
        /// What is missing
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// The direct Hardcover query failed.
    #[error(transparent)]
    Upstream(#[from] FetchError),
}

impl CheckError {
    /// Creates a `Transport` error.
    #[must_use]
    pub fn transport(url: &str, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.to_string(),
            source,
        }
    }

    /// Creates an `Http` error.
    #[must_use]
    pub fn http(url: &str, status: u16) -> Self {
        Self::Http {
            url: url.to_string(),
            status,
        }
    }

    /// Creates a `Shape` error.
    #[must_use]
    pub fn shape(url: &str, reason: impl Into<String>) -> Self {
        Self::Shape {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    /// Creates an `InvariantViolation` error.
    #[must_use]
    pub fn violation(reason: impl Into<String>) -> Self {
        Self::InvariantViolation {
            reason: reason.into(),
        }
    }

    /// Creates a `Config` error.
    #[must_use]
    pub fn config(reason: &str, suggestion: &str) -> Self {
        Self::Config {
            reason: reason.to_string(),
            suggestion: suggestion.to_string(),
        }
    }
}

impl From<ClientBuildError> for CheckError {
    fn from(error: ClientBuildError) -> Self {
        Self::config(&error.to_string(), "Check proxy environment variables")
    }
}
