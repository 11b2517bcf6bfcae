//! Hardcover list discovery and local API verification.
//!
//! # Architecture
//!
//! - [`hardcover`] - GraphQL client, query builders, and record types
//! - [`genre`] - keyword classification of lists and report rendering
//! - [`verify`] - checks run against a local search/proxy API
//! - [`settings`] - resolved runtime configuration
//! - [`http_client`] - shared HTTP client construction

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod genre;
pub mod hardcover;
pub mod http_client;
pub mod settings;
pub mod verify;

pub(crate) mod user_agent;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use genre::{Genre, GenreReport, ReportFormat, aggregate, classify};
pub use hardcover::{
    ApiToken, BookRecord, DEFAULT_GRAPHQL_URL, FetchError, HardcoverClient, ListRecord,
    ListWithBooks,
};
pub use http_client::{HttpTimeouts, build_http_client};
pub use settings::{DEFAULT_API_BASE_URL, Settings};
pub use verify::{
    CheckEnv, CheckError, Harness, VerificationOutcome, VerificationSummary,
};
