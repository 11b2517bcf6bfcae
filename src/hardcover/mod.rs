//! Read-only access to the Hardcover cataloguing GraphQL API.
//!
//! # Architecture
//!
//! - [`query`] - Builds parameterized GraphQL queries
//! - [`HardcoverClient`] - Posts queries and classifies failures into [`FetchError`]
//! - [`ListRecord`] / [`BookRecord`] - Decoded upstream records
//!
//! # Example
//!
//! ```no_run
//! use hardcover_lists::hardcover::{ApiToken, HardcoverClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HardcoverClient::new(ApiToken::new("my-token"))?;
//! let lists = client.discover_lists().await?;
//! println!("fetched {} lists", lists.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
pub mod query;
mod token;
mod types;

pub use client::{DEFAULT_GRAPHQL_URL, HardcoverClient};
pub use error::FetchError;
pub use query::GraphQlQuery;
pub use token::ApiToken;
pub use types::{BookRecord, ListRecord, ListWithBooks};
