//! Renderings of a [`GenreReport`].
//!
//! Aggregation never assumes an output sink; callers pick a [`ReportFormat`]
//! and write the returned string wherever they like.

use std::fmt::Write as _;

use super::GenreReport;

/// Default number of lists shown per genre in the text report.
pub const DEFAULT_PER_GENRE_LIMIT: usize = 10;

/// Output format for a genre report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Human-readable grouped listing.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl ReportFormat {
    /// Renders `report` in this format.
    ///
    /// # Errors
    ///
    /// Returns an error only if JSON serialization fails.
    pub fn render(
        self,
        report: &GenreReport,
        per_genre_limit: Option<usize>,
    ) -> Result<String, serde_json::Error> {
        match self {
            Self::Text => Ok(render_text(report, per_genre_limit)),
            Self::Json => render_json(report),
        }
    }
}

/// Renders the grouped text report, showing at most `per_genre_limit` lists per genre.
#[must_use]
pub fn render_text(report: &GenreReport, per_genre_limit: Option<usize>) -> String {
    let mut out = String::new();

    if report.is_empty() {
        out.push_str("No lists matched any genre.\n");
    }

    for (genre, lists) in report.iter() {
        let noun = if lists.len() == 1 { "list" } else { "lists" };
        let _ = writeln!(
            out,
            "{} ({} {noun})",
            genre.as_str().to_uppercase(),
            lists.len()
        );

        let shown = per_genre_limit.map_or(lists.len(), |limit| limit.min(lists.len()));
        for classified in &lists[..shown] {
            let list = &classified.list;
            let _ = writeln!(
                out,
                "  - {} [{}] {} books",
                list.name, list.slug, list.book_count
            );
        }
        if shown < lists.len() {
            let _ = writeln!(out, "  … and {} more", lists.len() - shown);
        }
        out.push('\n');
    }

    let _ = writeln!(
        out,
        "{} lists classified into {} genres ({} empty, {} unclassified)",
        report.total_lists(),
        report.genres().len(),
        report.empty_lists(),
        report.unclassified()
    );
    out
}

/// Renders the report as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(report: &GenreReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::genre::aggregate;
    use crate::hardcover::ListRecord;

    fn report() -> GenreReport {
        aggregate(&[
            ListRecord::new(1, "Best Romantasy Books", "romantasy-2024", None, 50),
            ListRecord::new(2, "Fae Courts", "fae-courts", None, 30),
            ListRecord::new(3, "Fairy Bargains", "fairy-bargains", None, 12),
            ListRecord::new(4, "Cozy Mysteries", "cozy-reads", None, 5),
        ])
    }

    #[test]
    fn test_render_text_groups_by_genre() {
        let text = render_text(&report(), None);
        assert!(text.contains("ROMANTASY (3 lists)"));
        assert!(text.contains("COZY (1 list)"));
        assert!(text.contains("  - Best Romantasy Books [romantasy-2024] 50 books"));
        let romantasy_at = text.find("ROMANTASY").unwrap();
        let cozy_at = text.find("COZY").unwrap();
        assert!(romantasy_at < cozy_at, "buckets must follow genre order");
    }

    #[test]
    fn test_render_text_truncates_per_genre() {
        let text = render_text(&report(), Some(1));
        assert!(text.contains("Best Romantasy Books"));
        assert!(!text.contains("Fae Courts"));
        assert!(text.contains("… and 2 more"));
    }

    #[test]
    fn test_render_text_summary_line() {
        let text = render_text(&report(), None);
        assert!(text.contains("4 lists classified into 2 genres (0 empty, 0 unclassified)"));
    }

    #[test]
    fn test_render_text_empty_report() {
        let text = render_text(&GenreReport::default(), None);
        assert!(text.starts_with("No lists matched any genre."));
    }

    #[test]
    fn test_render_json_round_trips_as_value() {
        let json = ReportFormat::Json.render(&report(), None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["genres"]["cozy"][0]["bookCount"], 5);
    }

    #[test]
    fn test_report_format_default_is_text() {
        assert_eq!(ReportFormat::default(), ReportFormat::Text);
    }
}
