//! Search command handler: find lists by name and classify them.

use anyhow::{Context, Result};
use hardcover_lists::{ReportFormat, Settings, aggregate};
use tracing::{error, info};

use crate::cli::SearchArgs;

use super::hardcover_client;

pub async fn run_search_command(args: &SearchArgs, settings: &Settings) -> Result<()> {
    let client = hardcover_client(settings)?;
    let lists = client
        .search_lists(&args.term)
        .await
        .inspect_err(|e| error!(error = %e, term = %args.term, "List search failed"))
        .with_context(|| format!("Failed to search Hardcover lists for '{}'", args.term))?;
    info!(lists = lists.len(), term = %args.term, "Fetched matching lists");

    if lists.is_empty() {
        println!("No lists found for '{}'.", args.term);
        return Ok(());
    }

    let report = aggregate(&lists);
    let rendered = ReportFormat::from(args.format).render(&report, None)?;
    print!("{rendered}");
    Ok(())
}
