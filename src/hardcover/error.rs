//! Error types for Hardcover GraphQL requests.
//!
//! Messages follow the What/Why/Suggestion pattern used across the project.

use thiserror::Error;

use crate::http_client::ClientBuildError;

/// Errors that can occur while fetching from the Hardcover GraphQL API.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The client could not be constructed.
    #[error("cannot build Hardcover client: {reason}\n  Suggestion: {suggestion}")]
    InvalidConfig {
        /// Why construction failed
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// Network-level failure (DNS, connection refused, TLS, timeout).
    #[error("cannot reach Hardcover at {url}: {source}\n  Suggestion: Check your network connection")]
    Transport {
        /// The endpoint that failed
        url: String,
        /// The underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx HTTP status.
    #[error("Hardcover returned HTTP {status} from {url}\n  Suggestion: {suggestion}")]
    Http {
        /// The endpoint that responded
        url: String,
        /// HTTP status code
        status: u16,
        /// Response body (possibly truncated) for diagnostics
        body: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// 2xx response whose payload carried a GraphQL `errors` array.
    #[error("Hardcover GraphQL error: {}", .messages.join("; "))]
    GraphQl {
        /// Error messages exactly as reported upstream
        messages: Vec<String>,
    },

    /// 2xx response missing the expected `data.<field>` payload.
    #[error("Hardcover response has no `{field}` field")]
    EmptyResult {
        /// The expected top-level field
        field: String,
    },

    /// Body was not JSON or records did not match the expected shape.
    #[error("unexpected Hardcover response shape for `{field}`: {reason}")]
    Decode {
        /// The field being decoded
        field: String,
        /// Decoder message
        reason: String,
    },
}

/// Longest response body kept in [`FetchError::Http`].
const MAX_ERROR_BODY_CHARS: usize = 500;

impl FetchError {
    /// Creates an `InvalidConfig` error.
    #[must_use]
    pub fn invalid_config(reason: &str, suggestion: &str) -> Self {
        Self::InvalidConfig {
            reason: reason.to_string(),
            suggestion: suggestion.to_string(),
        }
    }

    /// Creates a `Transport` error.
    #[must_use]
    pub fn transport(url: &str, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.to_string(),
            source,
        }
    }

    /// Creates an `Http` error with a status-specific suggestion.
    #[must_use]
    pub fn http(url: &str, status: u16, body: &str) -> Self {
        let suggestion = match status {
            401 | 403 => "Check HARDCOVER_TOKEN; copy it again from your Hardcover account settings",
            429 => "Hardcover rate limit exceeded. Try again in a minute",
            s if s >= 500 => "Hardcover API unavailable. Try again later",
            _ => "Check the GraphQL endpoint URL",
        };
        Self::Http {
            url: url.to_string(),
            status,
            body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            suggestion: suggestion.to_string(),
        }
    }

    /// Creates a `GraphQl` error.
    #[must_use]
    pub fn graphql(messages: Vec<String>) -> Self {
        Self::GraphQl { messages }
    }

    /// Creates an `EmptyResult` error.
    #[must_use]
    pub fn empty_result(field: &str) -> Self {
        Self::EmptyResult {
            field: field.to_string(),
        }
    }

    /// Creates a `Decode` error.
    #[must_use]
    pub fn decode(field: &str, reason: impl std::fmt::Display) -> Self {
        Self::Decode {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    /// HTTP status carried by this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<ClientBuildError> for FetchError {
    fn from(error: ClientBuildError) -> Self {
        Self::invalid_config(&error.to_string(), "Check proxy environment variables")
    }
}
