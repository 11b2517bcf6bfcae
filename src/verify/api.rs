//! Thin client for the local search/proxy API under verification.

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::http_client::{HttpTimeouts, build_http_client};

use super::CheckError;

/// Search endpoint path.
pub const SEARCH_PATH: &str = "/api/search";
/// Route prefix every cover URL must go through.
pub const PROXY_ROUTE_PREFIX: &str = "/api/proxy-image";
/// Bulk "all books by category" endpoint path.
pub const BOOKS_ALL_PATH: &str = "/api/books/all";

/// Status and content type of an image request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResponse {
    pub status: u16,
    pub content_type: Option<String>,
}

impl ImageResponse {
    /// Whether the response was 2xx with an `image/*` content type.
    #[must_use]
    pub fn is_image(&self) -> bool {
        (200..300).contains(&self.status)
            && self
                .content_type
                .as_deref()
                .is_some_and(|ct| ct.trim_start().to_ascii_lowercase().starts_with("image/"))
    }
}

/// HTTP client bound to one local API base URL.
#[derive(Debug)]
pub struct LocalApiClient {
    client: Client,
    base: Url,
}

impl LocalApiClient {
    /// Creates a client for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Config`] if the URL does not parse or the HTTP
    /// client cannot be built.
    pub fn new(base_url: &str, timeouts: HttpTimeouts) -> Result<Self, CheckError> {
        let base = Url::parse(base_url.trim()).map_err(|e| {
            CheckError::config(
                &format!("invalid local API base URL '{base_url}': {e}"),
                "Pass a full URL such as http://localhost:3001",
            )
        })?;
        let client = build_http_client("local-api", timeouts)?;
        Ok(Self { client, base })
    }

    /// The base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Resolves a relative path or absolute URL against the base.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Shape`] if the value cannot form a URL.
    pub fn resolve(&self, path_or_url: &str) -> Result<Url, CheckError> {
        self.base
            .join(path_or_url)
            .map_err(|e| CheckError::shape(path_or_url, format!("not a usable URL: {e}")))
    }

    /// Whether `cover` routes through the local image proxy.
    ///
    /// Relative paths must start with [`PROXY_ROUTE_PREFIX`]; absolute URLs
    /// must share the base origin and have a path with that prefix.
    #[must_use]
    pub fn is_proxy_path(&self, cover: &str) -> bool {
        let cover = cover.trim();
        if cover.starts_with('/') && !cover.starts_with("//") {
            return cover.starts_with(PROXY_ROUTE_PREFIX);
        }
        Url::parse(cover).is_ok_and(|url| {
            url.origin() == self.base.origin() && url.path().starts_with(PROXY_ROUTE_PREFIX)
        })
    }

    /// Calls the search endpoint with `term`.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckError`] on transport, status, or JSON decoding failure.
    pub async fn search(&self, term: &str) -> Result<Value, CheckError> {
        let mut url = self.resolve(SEARCH_PATH)?;
        url.query_pairs_mut().append_pair("q", term);
        self.get_json(url).await
    }

    /// Calls the bulk listing endpoint.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckError`] on transport, status, or JSON decoding failure.
    pub async fn books_all(&self) -> Result<Value, CheckError> {
        let url = self.resolve(BOOKS_ALL_PATH)?;
        self.get_json(url).await
    }

    /// Requests an image and reports its status and content type.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Transport`] when the request cannot be made.
    pub async fn fetch_image(&self, url: Url) -> Result<ImageResponse, CheckError> {
        debug!(%url, "Requesting proxied image");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| CheckError::transport(url.as_str(), e))?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(String::from);
        Ok(ImageResponse {
            status: response.status().as_u16(),
            content_type,
        })
    }

    async fn get_json(&self, url: Url) -> Result<Value, CheckError> {
        debug!(%url, "Calling local API");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| CheckError::transport(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CheckError::http(url.as_str(), status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CheckError::transport(url.as_str(), e))?;
        serde_json::from_str(&body)
            .map_err(|e| CheckError::shape(url.as_str(), format!("body is not JSON: {e}")))
    }
}
