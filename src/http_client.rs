//! Shared HTTP client construction policy.
//!
//! Both the Hardcover GraphQL client and the verification harness build their
//! `reqwest` clients here so timeout, user-agent, compression, and proxy
//! handling stay consistent.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use reqwest::Client;
use reqwest::{ClientBuilder, Proxy};
use thiserror::Error;
use tracing::warn;

use crate::user_agent;

/// Default connect timeout for every client.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default whole-request timeout for every client.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connect and request timeouts applied to a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    /// Seconds allowed to establish a connection.
    pub connect_secs: u64,
    /// Seconds allowed for the full request/response cycle.
    pub request_secs: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Errors raised while constructing an HTTP client.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// The builder rejected the configuration.
    #[error("HTTP client construction failed for {purpose}: {source}")]
    Build {
        /// Which client was being built (for diagnostics).
        purpose: String,
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },

    /// System proxy lookup panicked and the env-proxy fallback panicked too.
    #[error("HTTP client construction panicked for {purpose} while initializing networking")]
    Panicked {
        /// Which client was being built (for diagnostics).
        purpose: String,
    },
}

/// Builds an HTTP client using the shared project policy.
///
/// `purpose` only appears in logs and errors; it is never sent on the wire.
///
/// # Errors
///
/// Returns [`ClientBuildError`] when client construction fails.
pub fn build_http_client(purpose: &str, timeouts: HttpTimeouts) -> Result<Client, ClientBuildError> {
    match try_build_client(timeouts, false) {
        Ok(client) => Ok(client),
        Err(BuildClientFailure::Panic) => {
            // Some sandboxed environments panic when querying system proxy
            // settings; retry with env-proxy support only.
            warn!(
                client = purpose,
                "HTTP client hit system proxy panic; using env-proxy fallback builder"
            );
            match try_build_client(timeouts, true) {
                Ok(client) => Ok(client),
                Err(BuildClientFailure::Panic) => Err(ClientBuildError::Panicked {
                    purpose: purpose.to_string(),
                }),
                Err(BuildClientFailure::Build(source)) => Err(ClientBuildError::Build {
                    purpose: purpose.to_string(),
                    source,
                }),
            }
        }
        Err(BuildClientFailure::Build(source)) => Err(ClientBuildError::Build {
            purpose: purpose.to_string(),
            source,
        }),
    }
}

enum BuildClientFailure {
    Panic,
    Build(reqwest::Error),
}

fn try_build_client(
    timeouts: HttpTimeouts,
    disable_system_proxy_lookup: bool,
) -> Result<Client, BuildClientFailure> {
    catch_unwind(AssertUnwindSafe(move || {
        let mut builder = base_builder(timeouts);
        if disable_system_proxy_lookup {
            builder = apply_env_proxy_fallback(builder.no_proxy());
        }
        builder.build().map_err(BuildClientFailure::Build)
    }))
    .map_err(|_| BuildClientFailure::Panic)?
}

fn base_builder(timeouts: HttpTimeouts) -> ClientBuilder {
    Client::builder()
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .timeout(Duration::from_secs(timeouts.request_secs))
        .user_agent(user_agent::default_user_agent())
        .gzip(true)
}

fn apply_env_proxy_fallback(mut builder: ClientBuilder) -> ClientBuilder {
    if let Some(proxy) = env_proxy_for_scheme("https")
        && let Ok(resolved) = Proxy::https(&proxy)
    {
        builder = builder.proxy(resolved);
    }
    if let Some(proxy) = env_proxy_for_scheme("http")
        && let Ok(resolved) = Proxy::http(&proxy)
    {
        builder = builder.proxy(resolved);
    }
    builder
}

fn env_proxy_for_scheme(scheme: &str) -> Option<String> {
    match scheme {
        "https" => find_first_proxy_var(&["HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"]),
        "http" => find_first_proxy_var(&["HTTP_PROXY", "http_proxy", "ALL_PROXY", "all_proxy"]),
        _ => None,
    }
}

fn find_first_proxy_var(names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        std::env::var(name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}
