//! The standard verification checks.

use std::fmt::Write as _;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error, warn};

use super::{
    BOOKS_ALL_PATH, Check, CheckContext, CheckEnv, CheckError, EXPECTED_SOURCE, SEARCH_PATH,
    SearchResult, VerificationOutcome,
};

const MISSING: &str = "<missing>";

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Searches the local API and checks the first result's source and cover.
///
/// A proxied cover is stored in the context for [`ProxyCheck`], even when
/// the source assertion fails.
#[derive(Debug, Clone)]
pub struct SearchCheck {
    term: String,
}

impl SearchCheck {
    #[must_use]
    pub fn new(term: &str) -> Self {
        Self {
            term: term.to_string(),
        }
    }
}

#[async_trait]
impl Check for SearchCheck {
    fn name(&self) -> &'static str {
        "search"
    }

    async fn run(
        &self,
        env: &CheckEnv,
        ctx: &mut CheckContext,
    ) -> Result<VerificationOutcome, CheckError> {
        let body = env.api.search(&self.term).await?;
        let items = match body {
            Value::Array(items) => items,
            other => {
                return Err(CheckError::shape(
                    SEARCH_PATH,
                    format!("expected a JSON array, got {}", json_kind(&other)),
                ));
            }
        };

        let Some(first) = items.first() else {
            warn!(term = %self.term, "Search returned no results");
            return Ok(VerificationOutcome::passed(
                self.name(),
                format!("0 results for '{}'; nothing to assert", self.term),
            ));
        };

        let first: SearchResult = serde_json::from_value(first.clone())
            .map_err(|e| CheckError::shape(SEARCH_PATH, format!("first result malformed: {e}")))?;
        let title = first.title.as_deref().unwrap_or(MISSING);
        let author = first.author.as_deref().unwrap_or(MISSING);
        let source = first.source.as_deref().unwrap_or(MISSING);
        let cover = first.cover.as_deref().map(str::trim).filter(|c| !c.is_empty());

        if let Some(cover) = cover
            && env.api.is_proxy_path(cover)
        {
            ctx.cover = Some(cover.to_string());
        }

        if first.source.as_deref() != Some(EXPECTED_SOURCE) {
            return Err(CheckError::violation(format!(
                "first result '{title}' has source '{source}', expected '{EXPECTED_SOURCE}'"
            )));
        }

        match cover {
            Some(cover) if ctx.cover.is_none() => {
                return Err(CheckError::violation(format!(
                    "cover for '{title}' bypasses the image proxy: {cover}"
                )));
            }
            Some(_) => {}
            None => warn!(%title, "First search result has no cover"),
        }

        Ok(VerificationOutcome::passed(
            self.name(),
            format!(
                "{} results for '{}'; first is '{title}' by {author} from {source}",
                items.len(),
                self.term
            ),
        ))
    }
}

/// Fetches the cover found by [`SearchCheck`] and checks it is an image.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProxyCheck;

#[async_trait]
impl Check for ProxyCheck {
    fn name(&self) -> &'static str {
        "proxy"
    }

    async fn run(
        &self,
        env: &CheckEnv,
        ctx: &mut CheckContext,
    ) -> Result<VerificationOutcome, CheckError> {
        let Some(cover) = ctx.cover.as_deref() else {
            return Ok(VerificationOutcome::skipped(
                self.name(),
                "no input: search produced no proxied cover",
            ));
        };

        let url = env.api.resolve(cover)?;
        let image = env.api.fetch_image(url.clone()).await?;
        if !(200..300).contains(&image.status) {
            return Err(CheckError::http(url.as_str(), image.status));
        }

        let content_type = image.content_type.as_deref().unwrap_or("<none>");
        if !image.is_image() {
            return Err(CheckError::violation(format!(
                "{url} returned Content-Type '{content_type}', expected image/*"
            )));
        }

        Ok(VerificationOutcome::passed(
            self.name(),
            format!("{url} served {content_type}"),
        ))
    }
}

/// Queries Hardcover directly and checks the response carries `books`.
#[derive(Debug, Clone)]
pub struct UpstreamCheck {
    term: String,
}

impl UpstreamCheck {
    #[must_use]
    pub fn new(term: &str) -> Self {
        Self {
            term: term.to_string(),
        }
    }
}

#[async_trait]
impl Check for UpstreamCheck {
    fn name(&self) -> &'static str {
        "upstream"
    }

    async fn run(
        &self,
        env: &CheckEnv,
        _ctx: &mut CheckContext,
    ) -> Result<VerificationOutcome, CheckError> {
        let client = env.upstream.as_ref().map_err(|e| {
            CheckError::config(
                &format!("Hardcover client unavailable: {e}"),
                "Set HARDCOVER_TOKEN or pass --token",
            )
        })?;

        let books = client.search_books(&self.term).await?;
        if books.is_empty() {
            warn!(term = %self.term, "Hardcover returned no books");
        }

        let top: Vec<&str> = books.iter().take(3).map(|b| b.title.as_str()).collect();
        let detail = if top.is_empty() {
            format!("0 books for '{}'", self.term)
        } else {
            format!("{} books for '{}'; top: {}", books.len(), self.term, top.join(", "))
        };
        Ok(VerificationOutcome::passed(self.name(), detail))
    }
}

/// Checks every book in the bulk listing reports the expected source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleSourceCheck;

#[async_trait]
impl Check for SingleSourceCheck {
    fn name(&self) -> &'static str {
        "single-source"
    }

    async fn run(
        &self,
        env: &CheckEnv,
        _ctx: &mut CheckContext,
    ) -> Result<VerificationOutcome, CheckError> {
        let body = env.api.books_all().await?;
        let fields = match body {
            Value::Object(fields) => fields,
            other => {
                return Err(CheckError::shape(
                    BOOKS_ALL_PATH,
                    format!("expected a JSON object, got {}", json_kind(&other)),
                ));
            }
        };

        let mut categories = 0usize;
        let mut books = Vec::new();
        for (category, value) in &fields {
            if let Value::Array(entries) = value {
                debug!(%category, count = entries.len(), "Collected category");
                categories += 1;
                books.extend(entries.iter());
            }
        }
        if categories == 0 {
            return Err(CheckError::shape(
                BOOKS_ALL_PATH,
                "no category arrays in response",
            ));
        }

        let mut notes = Vec::new();
        match fields.get("totalBooks") {
            Some(value) => match value.as_u64() {
                Some(total) if usize::try_from(total).ok() != Some(books.len()) => {
                    warn!(
                        reported = total,
                        counted = books.len(),
                        "totalBooks does not match flattened book count"
                    );
                    notes.push(format!("totalBooks says {total}"));
                }
                Some(_) => {}
                None => {
                    warn!(
                        kind = json_kind(value),
                        "totalBooks is not an unsigned integer"
                    );
                    notes.push(format!("totalBooks is {}", json_kind(value)));
                }
            },
            None => debug!("No totalBooks field in bulk listing"),
        }

        let offenders: Vec<String> = books
            .iter()
            .filter(|book| book.get("source").and_then(Value::as_str) != Some(EXPECTED_SOURCE))
            .map(|book| {
                let title = book
                    .get("title")
                    .and_then(Value::as_str)
                    .unwrap_or("<untitled>");
                let source = book.get("source").and_then(Value::as_str).unwrap_or(MISSING);
                format!("{title} ({source})")
            })
            .collect();

        if !offenders.is_empty() {
            error!(count = offenders.len(), offenders = ?offenders, "Books from other sources");
            return Err(CheckError::violation(format!(
                "{} of {} books not from '{EXPECTED_SOURCE}': {}",
                offenders.len(),
                books.len(),
                offenders.join("; ")
            )));
        }

        if books.is_empty() {
            warn!("Bulk listing returned no books");
        }
        let mut detail = format!(
            "{} books across {categories} categories, all from '{EXPECTED_SOURCE}'",
            books.len()
        );
        if !notes.is_empty() {
            let _ = write!(detail, " ({})", notes.join(", "));
        }
        Ok(VerificationOutcome::passed(self.name(), detail))
    }
}
