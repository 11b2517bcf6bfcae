//! Config command handlers: show effective configuration.

use anyhow::Result;
use hardcover_lists::Settings;

use crate::app::config_runtime::verbosity_label;
use crate::app_config::LoadedConfig;
use crate::cli::Cli;

pub fn run_config_show_command(
    cli: &Cli,
    settings: &Settings,
    loaded: &LoadedConfig,
) -> Result<()> {
    let resolved_path = loaded.path.as_ref().map_or_else(
        || "<unresolved>".to_string(),
        |path| path.display().to_string(),
    );
    let file_verbosity = loaded.config.as_ref().and_then(|cfg| cfg.verbosity);

    println!("config_path = {resolved_path}");
    println!(
        "config_file = {}",
        if loaded.loaded_from_file() {
            "loaded"
        } else {
            "not found (using defaults)"
        }
    );
    println!(
        "token = {}",
        settings
            .token()
            .map_or_else(|| "<not set>".to_string(), |token| token.redacted())
    );
    println!("graphql_url = {}", settings.graphql_url);
    println!("api_base_url = {}", settings.api_base_url);
    println!("connect_timeout_secs = {}", settings.timeouts.connect_secs);
    println!("request_timeout_secs = {}", settings.timeouts.request_secs);
    println!(
        "verbosity = {}",
        verbosity_label(cli.verbose, cli.quiet, file_verbosity)
    );

    Ok(())
}
