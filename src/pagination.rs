//! Pagination walkers for Currents list endpoints.
//!
//! List endpoints wrap their results in a `{status, has_more, data}`
//! envelope. Two walkers unroll that envelope into a single `Vec`:
//!
//! - [`fetch_all_pages`] re-requests the same path until `has_more` is
//!   false (offset/limit style endpoints).
//! - [`fetch_all_cursor_pages`] threads the `cursor` of the last item of
//!   each page into a `starting_after` query parameter (cursor style
//!   endpoints), bounded by an iteration cap.
//!
//! Both walkers are strictly sequential and own their accumulator; any
//! failed inner request aborts the walk and propagates the error, so a
//! partial accumulation is never returned on failure.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::client::CurrentsClient;
use crate::error::Result;

/// Maximum continuation requests a cursor walk may issue beyond the first
/// call. Guards against a backend that never reports `has_more = false`.
pub const MAX_CURSOR_PAGES: u32 = 100;

/// Maximum pages for the offset walker (safety limit).
const MAX_OFFSET_PAGES: u32 = 1000;

/// The `{status, has_more, data}` envelope returned by list endpoints.
///
/// Only `has_more` and `data` are interpreted by the walkers; `status` is
/// carried through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Request status as reported by the backend (e.g. `"OK"`).
    pub status: String,
    /// Whether more pages are available after this one.
    pub has_more: bool,
    /// The items on this page. Present even when empty.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// An item that carries an opaque pagination cursor.
///
/// Items returned from cursor-paginated endpoints carry a `cursor` field
/// that the backend uses to resume listing after that item. The walker
/// reads it and otherwise treats the item as opaque.
pub trait Cursored {
    /// The cursor attached to this item, if any.
    fn cursor(&self) -> Option<&str>;
}

/// A partially typed list item: the `cursor` field is extracted, every
/// other field stays opaque JSON.
///
/// This is the item type to use when a tool wants to unroll a
/// cursor-paginated endpoint without committing to the payload's shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorItem {
    /// Pagination cursor for this item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// All remaining fields, uninterpreted.
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl Cursored for CursorItem {
    fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }
}

/// Fetch every page of an offset/limit paginated endpoint.
///
/// Re-requests `path` unmodified and appends each page's `data` until the
/// backend reports `has_more = false`. Page order and in-page order are
/// preserved.
///
/// # Errors
///
/// Returns an error if any page request fails; nothing accumulated up to
/// that point is returned.
pub async fn fetch_all_pages<T: DeserializeOwned>(
    client: &CurrentsClient,
    path: &str,
) -> Result<Vec<T>> {
    let mut all_items = Vec::new();
    let mut pages = 0u32;

    loop {
        let page: PaginatedResponse<T> = client.get_json(path).await?;
        all_items.extend(page.data);

        if !page.has_more {
            break;
        }

        pages += 1;
        if pages >= MAX_OFFSET_PAGES {
            tracing::warn!(
                path,
                limit = MAX_OFFSET_PAGES,
                "reached pagination page limit, returning partial results"
            );
            break;
        }
    }

    Ok(all_items)
}

/// Fetch every page of a cursor-paginated endpoint.
///
/// The first request uses `path` unmodified. Each continuation appends
/// `starting_after=<cursor>` where the cursor comes from the last item of
/// the page just received, percent-encoded. The walk stops when the
/// backend reports `has_more = false`, or after [`MAX_CURSOR_PAGES`]
/// continuations (a truncated success, not an error).
///
/// A page that claims `has_more = true` but has no item to take a cursor
/// from (empty `data`, or a last item without a `cursor` field) ends the
/// walk with whatever was accumulated; re-issuing a stale cursor would
/// loop until the cap without making progress.
///
/// # Errors
///
/// Returns an error if any page request fails; nothing accumulated up to
/// that point is returned.
pub async fn fetch_all_cursor_pages<T>(client: &CurrentsClient, path: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned + Cursored,
{
    let mut all_items: Vec<T> = Vec::new();
    let mut next_path = path.to_string();
    let mut continuations = 0u32;

    loop {
        let page: PaginatedResponse<T> = client.get_json(&next_path).await?;
        let cursor = page.data.last().and_then(|item| item.cursor().map(String::from));
        all_items.extend(page.data);

        if !page.has_more {
            break;
        }

        let Some(cursor) = cursor else {
            tracing::warn!(
                path,
                "backend reports more pages but the last page has no cursor to resume from, stopping"
            );
            break;
        };

        if continuations >= MAX_CURSOR_PAGES {
            tracing::warn!(
                path,
                limit = MAX_CURSOR_PAGES,
                "reached cursor pagination limit, returning partial results"
            );
            break;
        }
        continuations += 1;

        next_path = with_starting_after(path, &cursor);
    }

    Ok(all_items)
}

/// Append a percent-encoded `starting_after` parameter to a path.
fn with_starting_after(path: &str, cursor: &str) -> String {
    let sep = if path.contains('?') { '&' } else { '?' };
    format!("{path}{sep}starting_after={}", urlencoding::encode(cursor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_after_appends_with_question_mark() {
        assert_eq!(
            with_starting_after("projects", "abc"),
            "projects?starting_after=abc"
        );
    }

    #[test]
    fn starting_after_appends_with_ampersand_when_query_present() {
        assert_eq!(
            with_starting_after("projects?limit=10", "abc"),
            "projects?limit=10&starting_after=abc"
        );
    }

    #[test]
    fn starting_after_percent_encodes_reserved_characters() {
        assert_eq!(
            with_starting_after("items", "a+b c"),
            "items?starting_after=a%2Bb%20c"
        );
        assert_eq!(
            with_starting_after("items", "cursor+with spaces&special=chars"),
            "items?starting_after=cursor%2Bwith%20spaces%26special%3Dchars"
        );
    }

    #[test]
    fn envelope_deserializes_with_missing_data() {
        let page: PaginatedResponse<CursorItem> =
            serde_json::from_str(r#"{"status":"OK","has_more":false}"#).unwrap();
        assert!(page.data.is_empty());
        assert!(!page.has_more);
    }

    #[test]
    fn cursor_item_extracts_cursor_and_keeps_fields() {
        let item: CursorItem =
            serde_json::from_str(r#"{"cursor":"c1","projectId":"abc","name":"demo"}"#).unwrap();
        assert_eq!(item.cursor(), Some("c1"));
        assert_eq!(item.fields["projectId"], "abc");
        assert_eq!(item.fields["name"], "demo");
    }

    #[test]
    fn cursor_item_tolerates_missing_cursor() {
        let item: CursorItem = serde_json::from_str(r#"{"projectId":"abc"}"#).unwrap();
        assert_eq!(item.cursor(), None);
    }
}
