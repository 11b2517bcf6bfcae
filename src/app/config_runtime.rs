//! Merges CLI flags, environment, and the config file into [`Settings`].
//!
//! Precedence: CLI flag > environment variable > config file > default.
//! Clap already folds `HARDCOVER_TOKEN`, `HARDCOVER_GRAPHQL_URL`, and
//! `HARDCOVER_API_BASE` into the matching flags.

use hardcover_lists::http_client::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS};
use hardcover_lists::{
    ApiToken, DEFAULT_API_BASE_URL, DEFAULT_GRAPHQL_URL, HttpTimeouts, Settings,
};

use crate::app_config::{FileConfig, VerbositySetting};
use crate::cli::{Cli, Command};

/// Older name for the token variable, still honoured.
pub(crate) const TOKEN_ALIAS_ENV: &str = "HARDCOVER_API_TOKEN";
/// Local API base; read here for commands without `--api-base`.
pub(crate) const API_BASE_ENV: &str = "HARDCOVER_API_BASE";

/// Values taken from the environment outside of clap.
#[derive(Debug, Clone, Default)]
pub(crate) struct EnvOverrides {
    pub(crate) token_alias: Option<String>,
    pub(crate) api_base: Option<String>,
}

impl EnvOverrides {
    pub(crate) fn from_process_env() -> Self {
        Self {
            token_alias: env_var_non_empty(TOKEN_ALIAS_ENV),
            api_base: env_var_non_empty(API_BASE_ENV),
        }
    }
}

fn env_var_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

pub(crate) fn resolve_settings(
    cli: &Cli,
    env: &EnvOverrides,
    file_config: Option<&FileConfig>,
) -> Settings {
    let token = cli
        .token
        .clone()
        .filter(|token| !token.is_empty())
        .or_else(|| env.token_alias.as_deref().map(ApiToken::new))
        .or_else(|| file_config.and_then(|cfg| cfg.token.clone()))
        .filter(|token| !token.is_empty());

    let graphql_url = cli
        .graphql_url
        .clone()
        .or_else(|| file_config.and_then(|cfg| cfg.graphql_url.clone()))
        .unwrap_or_else(|| DEFAULT_GRAPHQL_URL.to_string());

    let cli_api_base = match &cli.command {
        Command::Verify(args) => args.api_base.clone(),
        _ => None,
    };
    let api_base_url = cli_api_base
        .or_else(|| env.api_base.clone())
        .or_else(|| file_config.and_then(|cfg| cfg.api_base_url.clone()))
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    Settings {
        token,
        graphql_url,
        api_base_url,
        timeouts: resolve_http_timeouts(file_config),
    }
}

pub(crate) fn resolve_http_timeouts(file_config: Option<&FileConfig>) -> HttpTimeouts {
    HttpTimeouts {
        connect_secs: file_config
            .and_then(|cfg| cfg.connect_timeout_secs)
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
        request_secs: file_config
            .and_then(|cfg| cfg.request_timeout_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
    }
}

/// Picks the default tracing level. Flags beat the config file.
pub(crate) fn log_level(
    verbose: u8,
    quiet: bool,
    file_verbosity: Option<VerbositySetting>,
) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => {}
        1 => return "debug",
        _ => return "trace",
    }
    match file_verbosity {
        Some(VerbositySetting::Quiet) => "error",
        Some(VerbositySetting::Verbose) => "debug",
        Some(VerbositySetting::Debug) => "trace",
        Some(VerbositySetting::Default) | None => "info",
    }
}

/// Label for `config show`.
pub(crate) fn verbosity_label(
    verbose: u8,
    quiet: bool,
    file_verbosity: Option<VerbositySetting>,
) -> &'static str {
    match log_level(verbose, quiet, file_verbosity) {
        "error" => VerbositySetting::Quiet.as_str(),
        "debug" => VerbositySetting::Verbose.as_str(),
        "trace" => VerbositySetting::Debug.as_str(),
        _ => VerbositySetting::Default.as_str(),
    }
}
