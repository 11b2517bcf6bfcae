//! Shared User-Agent string for upstream and local API clients.
//!
//! Single source for project URL and UA format so Hardcover traffic and
//! verification traffic identify the tool the same way.

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/fierce/hardcover-lists";

/// Default User-Agent for every HTTP client built by this crate.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("hardcover-lists/{version} (list-discovery-tool; +{PROJECT_UA_URL})")
}
