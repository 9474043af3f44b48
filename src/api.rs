//! YouTube Data API search client.
//!
//! This module wraps the v3 search endpoint behind a small trait so the
//! selection logic can be exercised against a stub provider in tests.
//!
//! # Architecture
//!
//! - [`SearchProvider`]: core trait defining an async video search
//! - [`YouTubeSearch`]: implementation backed by a shared `reqwest::Client`
//!
//! # Request Shape
//!
//! ```text
//! GET https://www.googleapis.com/youtube/v3/search
//!     ?part=snippet&q=<query>&type=video&maxResults=<n>&key=<api key>
//! ```
//!
//! A missing or empty `items` array in the response is zero results, not an
//! error. A non-2xx status or malformed JSON is an error, which the caller
//! contains per query.

use crate::models::{SearchItem, SearchResponse};
use std::error::Error;
use std::time::Instant;
use tracing::{debug, instrument, warn};

/// The v3 search endpoint.
const SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";

/// Trait for async video search.
///
/// Implementors take a free-text query and return the raw search result
/// items. This abstraction exists so tests can substitute a deterministic
/// provider for the real API.
pub trait SearchProvider {
    /// Search for videos matching `query`, returning at most `max_results`
    /// items.
    async fn search(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<SearchItem>, Box<dyn Error>>;
}

/// [`SearchProvider`] backed by the YouTube Data API v3.
#[derive(Debug)]
pub struct YouTubeSearch {
    client: reqwest::Client,
    api_key: String,
}

impl YouTubeSearch {
    /// Create a client that authenticates every request with `api_key`.
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }
}

impl SearchProvider for YouTubeSearch {
    #[instrument(level = "info", skip(self), fields(%query))]
    async fn search(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<SearchItem>, Box<dyn Error>> {
        let t0 = Instant::now();
        let response = self
            .client
            .get(SEARCH_URL)
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("maxResults", &max_results.to_string()),
                ("key", &self.api_key),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: SearchResponse = response.json().await?;
        let dt = t0.elapsed();

        if body.items.is_empty() {
            warn!(elapsed_ms = dt.as_millis(), "Search returned no items");
        } else {
            debug!(
                count = body.items.len(),
                elapsed_ms = dt.as_millis(),
                "Search succeeded"
            );
        }
        Ok(body.items)
    }
}
