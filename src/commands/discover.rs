//! Discover command handler: fetch the largest lists and group them by genre.

use anyhow::{Context, Result};
use hardcover_lists::{ReportFormat, Settings, aggregate};
use tracing::{error, info};

use crate::cli::DiscoverArgs;

use super::hardcover_client;

pub async fn run_discover_command(args: &DiscoverArgs, settings: &Settings) -> Result<()> {
    let client = hardcover_client(settings)?;
    let lists = client
        .discover_lists()
        .await
        .inspect_err(|e| error!(error = %e, "List discovery failed"))
        .context("Failed to fetch lists from Hardcover")?;
    info!(lists = lists.len(), "Fetched lists");

    let report = aggregate(&lists);
    let per_genre = (args.per_genre > 0).then_some(args.per_genre);
    let rendered = ReportFormat::from(args.format).render(&report, per_genre)?;
    print!("{rendered}");
    Ok(())
}
