//! Resolved runtime settings shared by the discovery and verification paths.
//!
//! The binary merges CLI flags, environment, and the config file into a
//! [`Settings`] value; library components are built from it and never read
//! the process environment themselves.

use crate::hardcover::{ApiToken, DEFAULT_GRAPHQL_URL};
use crate::http_client::HttpTimeouts;

/// Default base URL of the local search/proxy API under verification.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001";

/// Effective configuration for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Bearer token for the Hardcover API, if configured.
    pub token: Option<ApiToken>,
    /// Hardcover GraphQL endpoint.
    pub graphql_url: String,
    /// Base URL of the local API exercised by `verify`.
    pub api_base_url: String,
    /// Timeouts applied to every HTTP client.
    pub timeouts: HttpTimeouts,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            token: None,
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeouts: HttpTimeouts::default(),
        }
    }
}

impl Settings {
    /// Returns the token, if one is configured and non-empty after normalization.
    #[must_use]
    pub fn token(&self) -> Option<&ApiToken> {
        self.token.as_ref().filter(|token| !token.is_empty())
    }
}
