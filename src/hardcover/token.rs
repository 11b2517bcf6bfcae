//! Bearer token handling for the Hardcover API.

use std::fmt;

/// A normalized Hardcover API token.
///
/// Surrounding whitespace and a leading `Bearer ` prefix (as copied from the
/// Hardcover account page) are stripped. Anything else is kept verbatim so a
/// bad token fails upstream with HTTP 401 instead of being silently altered.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Normalizes a raw token string.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim();
        let without_scheme = trimmed
            .get(..7)
            .filter(|prefix| prefix.eq_ignore_ascii_case("bearer "))
            .map_or(trimmed, |_| trimmed[7..].trim_start());
        Self(without_scheme.to_string())
    }

    /// Returns the token value for use in an `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the token is empty after normalization.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the token contains characters that cannot appear in a header.
    #[must_use]
    pub fn has_control_chars(&self) -> bool {
        self.0.chars().any(char::is_control)
    }

    /// Redacted form for display: first four characters and the length.
    #[must_use]
    pub fn redacted(&self) -> String {
        let visible: String = self.0.chars().take(4).collect();
        format!("{visible}… ({} chars)", self.0.chars().count())
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiToken").field(&"<redacted>").finish()
    }
}
