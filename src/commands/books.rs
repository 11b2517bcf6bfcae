//! Books command handler: show the books in one list.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use hardcover_lists::{ListWithBooks, Settings};
use tracing::{error, info};

use crate::cli::BooksArgs;

use super::hardcover_client;

pub async fn run_books_command(args: &BooksArgs, settings: &Settings) -> Result<()> {
    let client = hardcover_client(settings)?;
    let list = client
        .list_books(&args.slug, args.limit)
        .await
        .inspect_err(|e| error!(error = %e, slug = %args.slug, "List lookup failed"))
        .with_context(|| format!("Failed to fetch list '{}'", args.slug))?;

    let Some(list) = list else {
        println!("No list found with slug '{}'.", args.slug);
        return Ok(());
    };
    info!(slug = %list.list.slug, books = list.books.len(), "Fetched list books");
    print!("{}", render_books(&list));
    Ok(())
}

/// Renders a list header followed by numbered books.
pub fn render_books(list: &ListWithBooks) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} [{}] {} books",
        list.list.name, list.list.slug, list.list.book_count
    );
    if list.books.is_empty() {
        out.push_str("  (no books)\n");
    }
    for (index, book) in list.books.iter().enumerate() {
        if book.authors.is_empty() {
            let _ = writeln!(out, "  {:>3}. {}", index + 1, book.title);
        } else {
            let _ = writeln!(
                out,
                "  {:>3}. {} by {}",
                index + 1,
                book.title,
                book.authors.join(", ")
            );
        }
    }
    if list.books.len() < usize::try_from(list.list.book_count).unwrap_or(usize::MAX) {
        let _ = writeln!(
            out,
            "  showing {} of {}",
            list.books.len(),
            list.list.book_count
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use hardcover_lists::{BookRecord, ListRecord, ListWithBooks};

    use super::render_books;

    fn book(id: i64, title: &str, authors: &[&str]) -> BookRecord {
        BookRecord {
            id,
            title: title.to_string(),
            slug: None,
            authors: authors.iter().map(|a| (*a).to_string()).collect(),
        }
    }

    #[test]
    fn test_render_books_numbers_entries_with_authors() {
        let list = ListWithBooks {
            list: ListRecord::new(4, "Fae Courts", "fae-courts", None, 2),
            books: vec![
                book(1, "A Court of Thorns and Roses", &["Sarah J. Maas"]),
                book(2, "The Cruel Prince", &[]),
            ],
        };
        let text = render_books(&list);
        assert!(text.starts_with("Fae Courts [fae-courts] 2 books"));
        assert!(text.contains("    1. A Court of Thorns and Roses by Sarah J. Maas"));
        assert!(text.contains("    2. The Cruel Prince\n"));
        assert!(!text.contains("showing"));
    }

    #[test]
    fn test_render_books_notes_truncation() {
        let list = ListWithBooks {
            list: ListRecord::new(4, "Fae Courts", "fae-courts", None, 30),
            books: vec![book(1, "The Cruel Prince", &["Holly Black"])],
        };
        assert!(render_books(&list).contains("showing 1 of 30"));
    }
}
