//! Genre classification and reporting for Hardcover lists.
//!
//! - [`classify`] - Ordered keyword rule chain
//! - [`aggregate`] - Groups classified lists into a [`GenreReport`]
//! - [`render`] - Text and JSON renderings of a report

mod classify;
pub mod render;
mod report;

pub use classify::{OTHER_MIN_BOOK_COUNT, classify, haystack, match_keywords};
pub use render::{ReportFormat, render_json, render_text};
pub use report::{ClassifiedList, GenreReport, aggregate};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Genre buckets, in report order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    Romantasy,
    Fantasy,
    SciFi,
    Cozy,
    Romance,
    Other,
}

impl Genre {
    /// Every genre, in report order.
    pub const ALL: [Self; 6] = [
        Self::Romantasy,
        Self::Fantasy,
        Self::SciFi,
        Self::Cozy,
        Self::Romance,
        Self::Other,
    ];

    /// Stable lowercase label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Romantasy => "romantasy",
            Self::Fantasy => "fantasy",
            Self::SciFi => "scifi",
            Self::Cozy => "cozy",
            Self::Romance => "romance",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_labels_match_serde() {
        for genre in Genre::ALL {
            let json = serde_json::to_value(genre).unwrap();
            assert_eq!(json, genre.as_str());
        }
    }

    #[test]
    fn test_genre_order_follows_declaration() {
        let mut shuffled = vec![Genre::Other, Genre::Cozy, Genre::Romantasy, Genre::SciFi];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![Genre::Romantasy, Genre::SciFi, Genre::Cozy, Genre::Other]
        );
    }

    #[test]
    fn test_genre_display() {
        assert_eq!(Genre::SciFi.to_string(), "scifi");
    }
}
