//! Data models for YouTube search responses and the persisted video entries.
//!
//! This module defines the two sides of the pipeline:
//! - [`SearchResponse`] / [`SearchItem`]: the YouTube Data API v3 search
//!   response shape, deserialized with serde
//! - [`VideoEntry`]: the unit that ends up embedded in the page's
//!   `CACHED_VIDEOS` block
//!
//! The API models use camelCase field names to match the JSON returned by
//! the search endpoint, hence the `#[serde(rename)]` attributes.

use serde::Deserialize;

/// A YouTube Data API v3 search response.
///
/// Only the `items` array is consumed. A response without an `items` field
/// (e.g., a query with zero hits) deserializes as an empty list rather than
/// an error.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    /// The search result items; empty when the query matched nothing.
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

/// A single search result item.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    /// The nested resource identifier.
    pub id: ResourceId,
    /// The result snippet carrying the human-readable metadata.
    pub snippet: Snippet,
}

/// The nested `id` object of a search result.
///
/// With `type=video` the `videoId` field is always populated, but the field
/// is optional in the API schema (channel and playlist results use other
/// keys), so it is modeled as an `Option` and filtered during selection.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceId {
    /// The eleven-character YouTube video identifier.
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
}

/// The `snippet` object of a search result.
#[derive(Debug, Clone, Deserialize)]
pub struct Snippet {
    /// The video title as returned by the API.
    pub title: String,
}

/// A video reference as persisted in the page's generated block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoEntry {
    /// The video identifier, unique per entry.
    pub video_id: String,
    /// The video title with `"` and `'` escaped for embedding in a
    /// JavaScript string literal.
    pub title: String,
}

impl VideoEntry {
    /// Build an entry from a raw id and title, escaping the title's quote
    /// characters so it can be embedded in the generated literal.
    pub fn new(video_id: String, title: &str) -> Self {
        Self {
            video_id,
            title: escape_title(title),
        }
    }
}

/// Escape `"` and `'` so a title can sit inside a double-quoted JavaScript
/// string literal.
pub fn escape_title(title: &str) -> String {
    title.replace('"', "\\\"").replace('\'', "\\'")
}
