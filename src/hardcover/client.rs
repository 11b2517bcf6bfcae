//! Hardcover GraphQL client.
//!
//! [`HardcoverClient`] posts a [`GraphQlQuery`] once (no retry) and classifies
//! every failure into a [`FetchError`] variant. Typed helpers decode the
//! `data.<root_field>` payload into list and book records.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::http_client::{HttpTimeouts, build_http_client};

use super::query::{self, DISCOVERY_PAGE_SIZE, GraphQlQuery};
use super::types::{BookRecord, ListRecord, ListWithBooks};
use super::{ApiToken, FetchError};

/// Default Hardcover GraphQL endpoint.
pub const DEFAULT_GRAPHQL_URL: &str = "https://api.hardcover.app/v1/graphql";

/// Read-only client for the Hardcover GraphQL API.
pub struct HardcoverClient {
    client: Client,
    endpoint: String,
    token: ApiToken,
}

impl HardcoverClient {
    /// Creates a client for the public Hardcover endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidConfig`] if the token cannot be sent as a
    /// header or the HTTP client cannot be built.
    pub fn new(token: ApiToken) -> Result<Self, FetchError> {
        Self::with_endpoint(token, DEFAULT_GRAPHQL_URL, HttpTimeouts::default())
    }

    /// Creates a client for a custom endpoint (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidConfig`] if the token cannot be sent as a
    /// header or the HTTP client cannot be built.
    #[tracing::instrument(skip_all)]
    pub fn with_endpoint(
        token: ApiToken,
        endpoint: impl AsRef<str>,
        timeouts: HttpTimeouts,
    ) -> Result<Self, FetchError> {
        if token.has_control_chars() {
            return Err(FetchError::invalid_config(
                "API token contains control characters",
                "Copy the token again without line breaks",
            ));
        }
        let client = build_http_client("hardcover", timeouts)?;
        Ok(Self {
            client,
            endpoint: endpoint.as_ref().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// The GraphQL endpoint this client posts to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts `query` and returns the `data.<root_field>` payload.
    ///
    /// A payload carrying an `errors` array is a failure even when partial
    /// `data` is present.
    ///
    /// # Errors
    ///
    /// Returns the [`FetchError`] variant matching the failure.
    #[tracing::instrument(skip(self, query), fields(root = query.root_field))]
    pub async fn fetch(&self, query: &GraphQlQuery) -> Result<Value, FetchError> {
        debug!(endpoint = %self.endpoint, "Posting GraphQL query");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.token.expose())
            .json(query)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Hardcover request failed");
                FetchError::transport(&self.endpoint, e)
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::transport(&self.endpoint, e))?;

        if !status.is_success() {
            debug!(status = status.as_u16(), "Hardcover returned error status");
            return Err(FetchError::http(&self.endpoint, status.as_u16(), &body));
        }

        let payload: Value =
            serde_json::from_str(&body).map_err(|e| FetchError::decode(query.root_field, e))?;
        extract_root(payload, query.root_field)
    }

    /// Top lists ranked by descending book count.
    ///
    /// # Errors
    ///
    /// See [`HardcoverClient::fetch`].
    pub async fn discover_lists(&self) -> Result<Vec<ListRecord>, FetchError> {
        self.fetch_records(&query::discover_lists(DISCOVERY_PAGE_SIZE))
            .await
    }

    /// Lists whose name contains `term`.
    ///
    /// # Errors
    ///
    /// See [`HardcoverClient::fetch`].
    pub async fn search_lists(&self, term: &str) -> Result<Vec<ListRecord>, FetchError> {
        self.fetch_records(&query::search_lists(term)).await
    }

    /// Books whose title contains `term`.
    ///
    /// # Errors
    ///
    /// See [`HardcoverClient::fetch`].
    pub async fn search_books(&self, term: &str) -> Result<Vec<BookRecord>, FetchError> {
        self.fetch_records(&query::search_books(term)).await
    }

    /// The list with `slug` and up to `limit` of its books; `None` if no such list.
    ///
    /// # Errors
    ///
    /// See [`HardcoverClient::fetch`].
    pub async fn list_books(
        &self,
        slug: &str,
        limit: u32,
    ) -> Result<Option<ListWithBooks>, FetchError> {
        let mut lists: Vec<ListWithBooks> =
            self.fetch_records(&query::list_books(slug, limit)).await?;
        if lists.is_empty() {
            Ok(None)
        } else {
            Ok(Some(lists.swap_remove(0)))
        }
    }

    async fn fetch_records<T: DeserializeOwned>(
        &self,
        query: &GraphQlQuery,
    ) -> Result<Vec<T>, FetchError> {
        let value = self.fetch(query).await?;
        let records: Vec<T> =
            serde_json::from_value(value).map_err(|e| FetchError::decode(query.root_field, e))?;
        debug!(count = records.len(), root = query.root_field, "Decoded records");
        Ok(records)
    }
}

impl std::fmt::Debug for HardcoverClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HardcoverClient")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

/// Pulls `data.<root_field>` out of a GraphQL payload.
fn extract_root(mut payload: Value, root_field: &str) -> Result<Value, FetchError> {
    if let Some(errors) = payload.get("errors")
        && !errors.is_null()
    {
        let messages = graphql_error_messages(errors);
        warn!(?messages, "Hardcover returned GraphQL errors");
        return Err(FetchError::graphql(messages));
    }

    match payload
        .get_mut("data")
        .and_then(|data| data.get_mut(root_field))
        .map(Value::take)
    {
        Some(value) if !value.is_null() => Ok(value),
        _ => Err(FetchError::empty_result(root_field)),
    }
}

/// Collects each error's `message`, falling back to the raw error JSON.
fn graphql_error_messages(errors: &Value) -> Vec<String> {
    match errors {
        Value::Array(entries) if !entries.is_empty() => entries
            .iter()
            .map(|entry| {
                entry
                    .get("message")
                    .and_then(Value::as_str)
                    .map_or_else(|| entry.to_string(), String::from)
            })
            .collect(),
        other => vec![other.to_string()],
    }
}
