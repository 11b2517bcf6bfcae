//! Verify command handler: run the harness against the local API.

use anyhow::{Context, Result};
use hardcover_lists::Settings;
use hardcover_lists::verify::{CheckEnv, Harness};
use tracing::info;

use crate::cli::VerifyArgs;

/// Prints every outcome and the summary. Failed checks do not change the
/// exit status.
pub async fn run_verify_command(args: &VerifyArgs, settings: &Settings) -> Result<()> {
    info!(
        api_base = %settings.api_base_url,
        term = %args.term,
        "Verifying local API"
    );
    let env = CheckEnv::from_settings(settings).context("Failed to prepare verification")?;
    let harness = Harness::with_default_checks(env, &args.term);
    let summary = harness.run().await;
    print!("{}", summary.render_text());
    Ok(())
}
