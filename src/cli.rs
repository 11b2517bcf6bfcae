//! CLI argument definitions using clap derive macros.

use clap::{Args, Parser, Subcommand, ValueEnum};

use hardcover_lists::genre::render::DEFAULT_PER_GENRE_LIMIT;
use hardcover_lists::hardcover::query::DEFAULT_LIST_BOOKS_LIMIT;
use hardcover_lists::verify::DEFAULT_SEARCH_TERM;
use hardcover_lists::{ApiToken, ReportFormat};

/// Discover Hardcover book lists by genre and verify a local book API.
#[derive(Parser, Debug)]
#[command(name = "hardcover-lists")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Hardcover API token
    #[arg(long, env = "HARDCOVER_TOKEN", hide_env_values = true, global = true, value_parser = parse_token)]
    pub token: Option<ApiToken>,

    /// Hardcover GraphQL endpoint
    #[arg(long, env = "HARDCOVER_GRAPHQL_URL", global = true)]
    pub graphql_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch the largest public lists and group them by genre
    Discover(DiscoverArgs),

    /// Search lists by name and group the matches by genre
    Search(SearchArgs),

    /// Show the books in one list
    Books(BooksArgs),

    /// Check that a local book API serves Hardcover data through its image proxy
    Verify(VerifyArgs),

    /// Manage persistent configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Args, Debug, Clone)]
pub struct DiscoverArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = FormatArg::Text)]
    pub format: FormatArg,

    /// Lists shown per genre in text output (0 shows all)
    #[arg(long, default_value_t = DEFAULT_PER_GENRE_LIMIT)]
    pub per_genre: usize,
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Text matched against list names
    #[arg(required = true)]
    pub term: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = FormatArg::Text)]
    pub format: FormatArg,
}

#[derive(Args, Debug, Clone)]
pub struct BooksArgs {
    /// List slug, e.g. "romantasy-2024"
    #[arg(required = true)]
    pub slug: String,

    /// Maximum books to fetch (1-500)
    #[arg(long, default_value_t = DEFAULT_LIST_BOOKS_LIMIT, value_parser = clap::value_parser!(u32).range(1..=500))]
    pub limit: u32,
}

#[derive(Args, Debug, Clone)]
pub struct VerifyArgs {
    /// Search term used by the search and upstream checks
    #[arg(default_value = DEFAULT_SEARCH_TERM)]
    pub term: String,

    /// Base URL of the local API
    #[arg(long, env = "HARDCOVER_API_BASE")]
    pub api_base: Option<String>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
}

/// Report output formats accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for ReportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

fn parse_token(raw: &str) -> Result<ApiToken, String> {
    let token = ApiToken::new(raw);
    if token.has_control_chars() {
        return Err("token contains control characters".to_string());
    }
    Ok(token)
}
