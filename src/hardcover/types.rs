//! Record types decoded from Hardcover GraphQL payloads.

use serde::{Deserialize, Serialize};

/// A curated list as returned by Hardcover at fetch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRecord {
    pub id: i64,
    pub name: String,
    /// URL-safe identifier, unique per list.
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "bookCount", alias = "books_count", default)]
    pub book_count: u32,
}

impl ListRecord {
    /// Convenience constructor used by tests and fixtures.
    #[must_use]
    pub fn new(
        id: i64,
        name: impl Into<String>,
        slug: impl Into<String>,
        description: Option<&str>,
        book_count: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            slug: slug.into(),
            description: description.map(String::from),
            book_count,
        }
    }
}

/// A book as returned by Hardcover search and list-membership queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawBook")]
pub struct BookRecord {
    pub id: i64,
    pub title: String,
    pub slug: Option<String>,
    /// Contributor names in upstream order, blanks removed.
    pub authors: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawBook {
    id: i64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    contributions: Vec<RawContribution>,
    #[serde(default)]
    authors: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawContribution {
    #[serde(default)]
    author: Option<RawAuthor>,
}

#[derive(Debug, Deserialize)]
struct RawAuthor {
    #[serde(default)]
    name: Option<String>,
}

impl From<RawBook> for BookRecord {
    fn from(raw: RawBook) -> Self {
        let mut authors: Vec<String> = raw
            .contributions
            .into_iter()
            .filter_map(|c| c.author.and_then(|a| a.name))
            .chain(raw.authors)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        authors.dedup();
        Self {
            id: raw.id,
            title: raw.title.unwrap_or_default(),
            slug: raw.slug,
            authors,
        }
    }
}

/// A list together with its member books, in list position order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListWithBooks {
    #[serde(flatten)]
    pub list: ListRecord,
    #[serde(rename = "list_books", default, deserialize_with = "deserialize_list_books")]
    pub books: Vec<BookRecord>,
}

#[derive(Debug, Deserialize)]
struct RawListBook {
    book: Option<BookRecord>,
}

fn deserialize_list_books<'de, D>(deserializer: D) -> Result<Vec<BookRecord>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let entries: Vec<RawListBook> = Vec::deserialize(deserializer)?;
    Ok(entries.into_iter().filter_map(|entry| entry.book).collect())
}
