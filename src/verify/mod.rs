//! Verification harness for a local book-search/proxy API.
//!
//! The harness runs an ordered list of [`Check`]s one after another. Each
//! check yields a [`VerificationOutcome`]; a failing check never stops the
//! checks after it. Later checks read what earlier ones found through the
//! shared [`CheckContext`].
//!
//! # Example
//!
//! ```no_run
//! use hardcover_lists::Settings;
//! use hardcover_lists::verify::{CheckEnv, Harness, DEFAULT_SEARCH_TERM};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = CheckEnv::from_settings(&Settings::default())?;
//! let harness = Harness::with_default_checks(env, DEFAULT_SEARCH_TERM);
//! let summary = harness.run().await;
//! print!("{}", summary.render_text());
//! # Ok(())
//! # }
//! ```

mod api;
mod checks;
mod error;

pub use api::{BOOKS_ALL_PATH, ImageResponse, LocalApiClient, PROXY_ROUTE_PREFIX, SEARCH_PATH};
pub use checks::{ProxyCheck, SearchCheck, SingleSourceCheck, UpstreamCheck};
pub use error::CheckError;

use std::fmt::Write as _;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::Settings;
use crate::hardcover::{ApiToken, FetchError, HardcoverClient};

/// The only `source` value a compliant API may report.
pub const EXPECTED_SOURCE: &str = "hardcover";
/// Search term used when none is given.
pub const DEFAULT_SEARCH_TERM: &str = "Digital Fortress";

/// One result from the local search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
}

/// Result of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Passed,
    Failed,
    Skipped,
}

impl CheckStatus {
    /// Fixed-width tag for console output.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Passed => "PASS",
            Self::Failed => "FAIL",
            Self::Skipped => "SKIP",
        }
    }
}

/// What one check found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationOutcome {
    pub check_name: String,
    pub status: CheckStatus,
    pub detail: String,
}

impl VerificationOutcome {
    /// A passing outcome.
    #[must_use]
    pub fn passed(check_name: &str, detail: impl Into<String>) -> Self {
        Self::new(check_name, CheckStatus::Passed, detail)
    }

    /// A failing outcome.
    #[must_use]
    pub fn failed(check_name: &str, detail: impl Into<String>) -> Self {
        Self::new(check_name, CheckStatus::Failed, detail)
    }

    /// An outcome for a check that had nothing to verify.
    #[must_use]
    pub fn skipped(check_name: &str, detail: impl Into<String>) -> Self {
        Self::new(check_name, CheckStatus::Skipped, detail)
    }

    fn new(check_name: &str, status: CheckStatus, detail: impl Into<String>) -> Self {
        Self {
            check_name: check_name.to_string(),
            status,
            detail: detail.into(),
        }
    }

    /// Whether the check passed.
    #[must_use]
    pub fn is_passed(&self) -> bool {
        self.status == CheckStatus::Passed
    }
}

/// Values handed from earlier checks to later ones.
#[derive(Debug, Default, Clone)]
pub struct CheckContext {
    /// Proxied cover path found by the search check.
    pub cover: Option<String>,
}

/// Clients shared by all checks.
#[derive(Debug)]
pub struct CheckEnv {
    pub api: LocalApiClient,
    /// Direct Hardcover client, or why one could not be built.
    pub upstream: Result<HardcoverClient, FetchError>,
}

impl CheckEnv {
    /// Builds both clients from `settings`.
    ///
    /// A missing or unusable token does not fail construction; only the
    /// upstream check reports it.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Config`] if the local API client cannot be built.
    pub fn from_settings(settings: &Settings) -> Result<Self, CheckError> {
        let api = LocalApiClient::new(&settings.api_base_url, settings.timeouts)?;
        let upstream = settings
            .token()
            .cloned()
            .ok_or_else(|| {
                FetchError::invalid_config(
                    "no Hardcover API token configured",
                    "Set HARDCOVER_TOKEN or pass --token",
                )
            })
            .and_then(|token: ApiToken| {
                HardcoverClient::with_endpoint(token, &settings.graphql_url, settings.timeouts)
            });
        if let Err(e) = &upstream {
            warn!(error = %e, "Direct Hardcover checks will fail");
        }
        Ok(Self { api, upstream })
    }
}

/// A single verification step.
///
/// Uses `async_trait` so the harness can hold `Box<dyn Check>`.
#[async_trait]
pub trait Check: Send + Sync {
    /// Short stable name shown in output (e.g. "search").
    fn name(&self) -> &'static str;

    /// Runs the check. An `Err` becomes a failed outcome.
    async fn run(
        &self,
        env: &CheckEnv,
        ctx: &mut CheckContext,
    ) -> Result<VerificationOutcome, CheckError>;
}

/// Ordered collection of checks plus the clients they use.
pub struct Harness {
    env: CheckEnv,
    checks: Vec<Box<dyn Check>>,
}

impl Harness {
    /// Creates a harness with no checks.
    #[must_use]
    pub fn new(env: CheckEnv) -> Self {
        Self {
            env,
            checks: Vec::new(),
        }
    }

    /// Creates a harness with the standard four checks in order:
    /// search, proxy, upstream, single-source.
    #[must_use]
    pub fn with_default_checks(env: CheckEnv, term: &str) -> Self {
        let mut harness = Self::new(env);
        harness.register(Box::new(SearchCheck::new(term)));
        harness.register(Box::new(ProxyCheck));
        harness.register(Box::new(UpstreamCheck::new(term)));
        harness.register(Box::new(SingleSourceCheck));
        harness
    }

    /// Appends a check; checks run in registration order.
    pub fn register(&mut self, check: Box<dyn Check>) {
        debug!(name = check.name(), "Registering check");
        self.checks.push(check);
    }

    /// Names of the registered checks, in run order.
    #[must_use]
    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|check| check.name()).collect()
    }

    /// Runs every check sequentially and always returns a summary.
    #[tracing::instrument(skip(self), fields(checks = self.checks.len()))]
    pub async fn run(&self) -> VerificationSummary {
        let mut ctx = CheckContext::default();
        let mut outcomes = Vec::with_capacity(self.checks.len());

        for check in &self.checks {
            debug!(check = check.name(), "Running check");
            let outcome = match check.run(&self.env, &mut ctx).await {
                Ok(outcome) => outcome,
                Err(err) => VerificationOutcome::failed(check.name(), err.to_string()),
            };
            log_outcome(&outcome);
            outcomes.push(outcome);
        }

        VerificationSummary { outcomes }
    }
}

fn log_outcome(outcome: &VerificationOutcome) {
    match outcome.status {
        CheckStatus::Passed => {
            info!(check = %outcome.check_name, detail = %outcome.detail, "Check passed");
        }
        CheckStatus::Skipped => {
            warn!(check = %outcome.check_name, detail = %outcome.detail, "Check skipped");
        }
        CheckStatus::Failed => {
            error!(check = %outcome.check_name, detail = %outcome.detail, "Check failed");
        }
    }
}

/// Outcomes of one harness run, in check order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationSummary {
    pub outcomes: Vec<VerificationOutcome>,
}

impl VerificationSummary {
    fn count(&self, status: CheckStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    /// Number of passed checks.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.count(CheckStatus::Passed)
    }

    /// Number of failed checks.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(CheckStatus::Failed)
    }

    /// Number of skipped checks.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(CheckStatus::Skipped)
    }

    /// Outcome of the check called `name`, if it ran.
    #[must_use]
    pub fn outcome(&self, name: &str) -> Option<&VerificationOutcome> {
        self.outcomes.iter().find(|o| o.check_name == name)
    }

    /// One line per check followed by the totals.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for outcome in &self.outcomes {
            let _ = writeln!(
                out,
                "[{}] {}: {}",
                outcome.status.tag(),
                outcome.check_name,
                outcome.detail
            );
        }
        let _ = writeln!(
            out,
            "\nSummary: {} passed, {} failed, {} skipped ({} checks)",
            self.passed(),
            self.failed(),
            self.skipped(),
            self.outcomes.len()
        );
        out
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    struct FixedCheck {
        name: &'static str,
        fail: bool,
    }

    #[async_trait]
    impl Check for FixedCheck {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn run(
            &self,
            _env: &CheckEnv,
            ctx: &mut CheckContext,
        ) -> Result<VerificationOutcome, CheckError> {
            if self.fail {
                return Err(CheckError::violation(format!("{} broke", self.name)));
            }
            ctx.cover = Some(format!("/api/proxy-image?from={}", self.name));
            Ok(VerificationOutcome::passed(self.name, "ok"))
        }
    }

    fn offline_env() -> CheckEnv {
        CheckEnv::from_settings(&Settings::default()).unwrap()
    }

    #[test]
    fn test_env_without_token_keeps_upstream_error() {
        let env = offline_env();
        let err = env.upstream.unwrap_err();
        assert!(err.to_string().contains("no Hardcover API token"));
    }

    #[test]
    fn test_default_checks_order() {
        let harness = Harness::with_default_checks(offline_env(), DEFAULT_SEARCH_TERM);
        assert_eq!(
            harness.check_names(),
            vec!["search", "proxy", "upstream", "single-source"]
        );
    }

    #[tokio::test]
    async fn test_run_does_not_short_circuit_on_failure() {
        let mut harness = Harness::new(offline_env());
        harness.register(Box::new(FixedCheck {
            name: "first",
            fail: true,
        }));
        harness.register(Box::new(FixedCheck {
            name: "second",
            fail: false,
        }));

        let summary = harness.run().await;
        assert_eq!(summary.outcomes.len(), 2);
        assert_eq!(summary.outcome("first").unwrap().status, CheckStatus::Failed);
        assert!(summary.outcome("first").unwrap().detail.contains("first broke"));
        assert!(summary.outcome("second").unwrap().is_passed());
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.passed(), 1);
    }

    #[test]
    fn test_summary_render_text() {
        let summary = VerificationSummary {
            outcomes: vec![
                VerificationOutcome::passed("search", "1 result"),
                VerificationOutcome::skipped("proxy", "no input"),
                VerificationOutcome::failed("single-source", "bad"),
            ],
        };
        let text = summary.render_text();
        assert!(text.contains("[PASS] search: 1 result"));
        assert!(text.contains("[SKIP] proxy: no input"));
        assert!(text.contains("[FAIL] single-source: bad"));
        assert!(text.contains("Summary: 1 passed, 1 failed, 1 skipped (3 checks)"));
    }

    #[test]
    fn test_search_result_tolerates_missing_fields() {
        let result: SearchResult =
            serde_json::from_value(serde_json::json!({"title": "Digital Fortress"})).unwrap();
        assert_eq!(result.title.as_deref(), Some("Digital Fortress"));
        assert!(result.source.is_none());
        assert!(result.cover.is_none());
    }
}
