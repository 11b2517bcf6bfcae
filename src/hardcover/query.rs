//! GraphQL query construction for the Hardcover API.
//!
//! Anything that can carry user input is bound as a GraphQL variable. Only
//! the static discovery query interpolates a value (its page size) into the
//! query text.

use serde::Serialize;
use serde_json::{Value, json};

/// Page size for the full discovery listing.
pub const DISCOVERY_PAGE_SIZE: u32 = 100;
/// Page size for targeted list and book searches.
pub const SEARCH_PAGE_SIZE: u32 = 20;
/// Default number of books fetched for a single list.
pub const DEFAULT_LIST_BOOKS_LIMIT: u32 = 50;

const LIST_FIELDS: &str = "id name slug description books_count";
const BOOK_FIELDS: &str = "id title slug contributions { author { name } }";

/// A GraphQL request body plus the top-level `data` field it is expected to return.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQlQuery {
    pub query: String,
    pub variables: Value,
    #[serde(skip)]
    pub root_field: &'static str,
}

impl GraphQlQuery {
    fn new(query: String, variables: Value, root_field: &'static str) -> Self {
        Self {
            query,
            variables,
            root_field,
        }
    }
}

/// All lists ranked by descending book count, capped at `limit`.
#[must_use]
pub fn discover_lists(limit: u32) -> GraphQlQuery {
    let query = format!(
        "query DiscoverLists {{ lists(order_by: {{books_count: desc}}, limit: {limit}) {{ {LIST_FIELDS} }} }}"
    );
    GraphQlQuery::new(query, json!({}), "lists")
}

/// Lists whose name contains `term`, case-insensitively.
#[must_use]
pub fn search_lists(term: &str) -> GraphQlQuery {
    let query = format!(
        "query SearchLists($term: String!) {{ lists(where: {{name: {{_ilike: $term}}}}, order_by: {{books_count: desc}}, limit: {SEARCH_PAGE_SIZE}) {{ {LIST_FIELDS} }} }}"
    );
    GraphQlQuery::new(query, json!({ "term": ilike_pattern(term) }), "lists")
}

/// Books whose title contains `term`, case-insensitively.
#[must_use]
pub fn search_books(term: &str) -> GraphQlQuery {
    let query = format!(
        "query SearchBooks($term: String!) {{ books(where: {{title: {{_ilike: $term}}}}, order_by: {{users_count: desc}}, limit: {SEARCH_PAGE_SIZE}) {{ {BOOK_FIELDS} }} }}"
    );
    GraphQlQuery::new(query, json!({ "term": ilike_pattern(term) }), "books")
}

/// The list identified by `slug` together with up to `limit` of its books.
#[must_use]
pub fn list_books(slug: &str, limit: u32) -> GraphQlQuery {
    let query = format!(
        "query ListBooks($slug: String!, $limit: Int!) {{ lists(where: {{slug: {{_eq: $slug}}}}, limit: 1) {{ {LIST_FIELDS} list_books(order_by: {{position: asc}}, limit: $limit) {{ book {{ {BOOK_FIELDS} }} }} }} }}"
    );
    GraphQlQuery::new(
        query,
        json!({ "slug": slug.trim(), "limit": limit }),
        "lists",
    )
}

/// Wraps a search term for a substring `_ilike` match.
///
/// LIKE metacharacters in the term are escaped so they match literally.
#[must_use]
pub fn ilike_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.trim().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
