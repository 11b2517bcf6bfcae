//! CLI entry point for hardcover-lists.

use anyhow::Result;
use clap::Parser;
use tracing::debug;

mod app;
mod app_config;
mod cli;
mod commands;

use app::config_runtime::{self, EnvOverrides};
use app::terminal;
use app_config::load_default_file_config;
use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let cli = Cli::parse();

    let loaded = load_default_file_config()?;
    let file_config = loaded.config.as_ref();

    let no_color = terminal::should_disable_color(
        terminal::no_color_env_requested(),
        terminal::is_dumb_terminal(),
    );
    let level = config_runtime::log_level(
        cli.verbose,
        cli.quiet,
        file_config.and_then(|cfg| cfg.verbosity),
    );
    terminal::init_tracing(level, no_color);
    debug!(?cli, "CLI arguments parsed");

    let settings =
        config_runtime::resolve_settings(&cli, &EnvOverrides::from_process_env(), file_config);
    debug!(?settings, "Resolved settings");

    commands::dispatch(&cli, &settings, &loaded).await
}
