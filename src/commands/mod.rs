//! CLI command handlers.

mod books;
mod config;
mod discover;
mod search;
mod verify;

use anyhow::{Result, bail};
use hardcover_lists::{HardcoverClient, Settings};

use crate::app_config::LoadedConfig;
use crate::cli::{Cli, Command, ConfigCommand};

pub use books::run_books_command;
pub use config::run_config_show_command;
pub use discover::run_discover_command;
pub use search::run_search_command;
pub use verify::run_verify_command;

/// Runs the subcommand selected on the command line.
pub async fn dispatch(cli: &Cli, settings: &Settings, loaded: &LoadedConfig) -> Result<()> {
    match &cli.command {
        Command::Discover(args) => run_discover_command(args, settings).await,
        Command::Search(args) => run_search_command(args, settings).await,
        Command::Books(args) => run_books_command(args, settings).await,
        Command::Verify(args) => run_verify_command(args, settings).await,
        Command::Config { command } => match command {
            ConfigCommand::Show => run_config_show_command(cli, settings, loaded),
        },
    }
}

fn hardcover_client(settings: &Settings) -> Result<HardcoverClient> {
    let Some(token) = settings.token().cloned() else {
        bail!(
            "No Hardcover API token configured\n  Suggestion: Set HARDCOVER_TOKEN, pass --token, or add `token` to the config file"
        );
    };
    Ok(HardcoverClient::with_endpoint(
        token,
        &settings.graphql_url,
        settings.timeouts,
    )?)
}
