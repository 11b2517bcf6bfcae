//! Aggregation of classified lists into genre buckets.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::hardcover::ListRecord;

use super::{Genre, classify};

/// A list together with the single genre it was assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedList {
    #[serde(flatten)]
    pub list: ListRecord,
    pub genre: Genre,
}

/// Lists grouped by genre.
///
/// Buckets iterate in [`Genre`] order; lists within a bucket keep the order
/// they were given in. Empty buckets are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreReport {
    genres: BTreeMap<Genre, Vec<ClassifiedList>>,
    /// Lists dropped because they hold no books.
    empty_lists: usize,
    /// Lists that matched no rule and were too small for `other`.
    unclassified: usize,
}

impl GenreReport {
    /// Lists in `genre`, or `None` when that bucket is empty.
    #[must_use]
    pub fn bucket(&self, genre: Genre) -> Option<&[ClassifiedList]> {
        self.genres.get(&genre).map(Vec::as_slice)
    }

    /// Non-empty buckets in genre order.
    pub fn iter(&self) -> impl Iterator<Item = (Genre, &[ClassifiedList])> {
        self.genres.iter().map(|(genre, lists)| (*genre, lists.as_slice()))
    }

    /// Genres that have at least one list.
    #[must_use]
    pub fn genres(&self) -> Vec<Genre> {
        self.genres.keys().copied().collect()
    }

    /// Total number of classified lists across all buckets.
    #[must_use]
    pub fn total_lists(&self) -> usize {
        self.genres.values().map(Vec::len).sum()
    }

    /// Whether no list was classified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }

    /// Lists dropped for having zero books.
    #[must_use]
    pub fn empty_lists(&self) -> usize {
        self.empty_lists
    }

    /// Lists excluded by the classifier.
    #[must_use]
    pub fn unclassified(&self) -> usize {
        self.unclassified
    }
}

/// Classifies `lists` and groups them by genre.
///
/// Lists with zero books are dropped before classification.
#[must_use]
pub fn aggregate(lists: &[ListRecord]) -> GenreReport {
    let mut report = GenreReport::default();

    for list in lists {
        if list.book_count == 0 {
            report.empty_lists += 1;
            continue;
        }
        match classify(list) {
            Some(genre) => report.genres.entry(genre).or_default().push(ClassifiedList {
                list: list.clone(),
                genre,
            }),
            None => report.unclassified += 1,
        }
    }

    debug!(
        input = lists.len(),
        classified = report.total_lists(),
        buckets = report.genres.len(),
        empty = report.empty_lists,
        unclassified = report.unclassified,
        "Aggregated lists"
    );
    report
}
