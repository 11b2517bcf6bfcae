//! Keyword rule chain mapping a list's text to a genre.
//!
//! Rules are evaluated top to bottom and the first match wins. The order is
//! part of the contract: `romantasy` must be checked before `fantasy`.

use tracing::trace;

use crate::hardcover::ListRecord;

use super::Genre;

/// Lists with no keyword match need more than this many books to land in `other`.
pub const OTHER_MIN_BOOK_COUNT: u32 = 10;

/// One step of the rule chain.
struct GenreRule {
    genre: Genre,
    matches: fn(&str) -> bool,
}

const RULES: &[GenreRule] = &[
    GenreRule {
        genre: Genre::Romantasy,
        matches: is_romantasy,
    },
    GenreRule {
        genre: Genre::Fantasy,
        matches: is_fantasy,
    },
    GenreRule {
        genre: Genre::SciFi,
        matches: is_scifi,
    },
    GenreRule {
        genre: Genre::Cozy,
        matches: is_cozy,
    },
    GenreRule {
        genre: Genre::Romance,
        matches: is_romance,
    },
];

fn is_romantasy(haystack: &str) -> bool {
    ["romantasy", "fae", "fairy"]
        .iter()
        .any(|kw| haystack.contains(kw))
}

fn is_fantasy(haystack: &str) -> bool {
    haystack.contains("fantasy") && !haystack.contains("sci")
}

fn is_scifi(haystack: &str) -> bool {
    ["sci-fi", "science fiction", "dystopian"]
        .iter()
        .any(|kw| haystack.contains(kw))
}

fn is_cozy(haystack: &str) -> bool {
    haystack.contains("cozy") || haystack.contains("comfort")
}

fn is_romance(haystack: &str) -> bool {
    haystack.contains("romance") && !haystack.contains("fantasy")
}

/// Lowercased `name slug description` text the rules run against.
#[must_use]
pub fn haystack(list: &ListRecord) -> String {
    format!(
        "{} {} {}",
        list.name,
        list.slug,
        list.description.as_deref().unwrap_or_default()
    )
    .to_lowercase()
}

/// Runs the keyword rules only; `None` when no keyword matches.
#[must_use]
pub fn match_keywords(haystack: &str) -> Option<Genre> {
    RULES
        .iter()
        .find(|rule| (rule.matches)(haystack))
        .map(|rule| rule.genre)
}

/// Assigns `list` a genre, or `None` when it belongs in no bucket.
///
/// Lists without a keyword match fall back to [`Genre::Other`] only when they
/// hold more than [`OTHER_MIN_BOOK_COUNT`] books.
#[must_use]
pub fn classify(list: &ListRecord) -> Option<Genre> {
    let text = haystack(list);
    let genre = match_keywords(&text).or_else(|| {
        (list.book_count > OTHER_MIN_BOOK_COUNT).then_some(Genre::Other)
    });
    trace!(slug = %list.slug, ?genre, "Classified list");
    genre
}
