//! # Weekly Videos
//!
//! A small updater that refreshes the `CACHED_VIDEOS` block embedded in a
//! static web page with a fresh rotation of YouTube search results.
//!
//! ## Features
//!
//! - Rotates through a fixed multilingual vocabulary of "day in the life"
//!   search phrases, seeded from the ISO week number
//! - Queries the YouTube Data API v3 sequentially with a rate-limit delay
//! - Deduplicates by video id and samples at most 12 entries
//! - Rewrites the generated block and the `// Last updated: Week N` marker
//!   in place, leaving the rest of the file byte-identical
//!
//! ## Usage
//!
//! ```sh
//! YOUTUBE_API_KEY=... weekly_videos --index-file index.html
//! ```
//!
//! ## Architecture
//!
//! Two stages run sequentially with no shared state:
//! 1. **Selection**: pick queries, search, dedupe, sample
//! 2. **Patching**: rewrite the generated block inside the target file

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod models;
mod patcher;
mod selector;

use api::YouTubeSearch;
use cli::Cli;

/// Delay between successive search calls, to stay under API rate limits.
const QUERY_DELAY: Duration = Duration::from_secs(1);

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("weekly_videos starting up");

    // Parse CLI; a missing YOUTUBE_API_KEY aborts here with a clap error,
    // before any side effect.
    let args = Cli::parse();
    debug!(index_file = %args.index_file, deterministic = args.deterministic, "Parsed CLI arguments");

    let today = Local::now().date_naive();
    let week = selector::week_number(today);
    info!(%today, week, "Computed ISO week number");

    // Read the target up front so a bad path fails before any API quota is
    // spent. Nothing is written until the patch has fully succeeded.
    let content = match tokio::fs::read_to_string(&args.index_file).await {
        Ok(content) => content,
        Err(e) => {
            error!(path = %args.index_file, error = %e, "Failed to read target file");
            return Err(e.into());
        }
    };
    info!(path = %args.index_file, bytes = content.len(), "Read target file");

    // ---- Select this week's videos ----
    let provider = YouTubeSearch::new(args.api_key);
    let mut rng = selector::selection_rng(week, args.deterministic);
    let entries = selector::select_videos(
        &provider,
        &mut rng,
        selector::SEARCH_QUERIES,
        QUERY_DELAY,
    )
    .await;

    // An empty selection still gets written: per-query failures are
    // contained, so a run with zero results is a successful run that
    // produces an empty block.
    if entries.is_empty() {
        warn!("No videos collected; writing an empty block");
    } else {
        info!(count = entries.len(), "Collected video entries");
    }

    // ---- Patch the page ----
    let patched = match patcher::patch_index(&content, &entries, week) {
        Ok(patched) => patched,
        Err(e) => {
            error!(path = %args.index_file, error = %e, "Patch failed; file left untouched");
            return Err(e.into());
        }
    };

    if let Err(e) = tokio::fs::write(&args.index_file, &patched).await {
        error!(path = %args.index_file, error = %e, "Failed to write target file");
        return Err(e.into());
    }

    let elapsed = start_time.elapsed();
    info!(
        path = %args.index_file,
        videos = entries.len(),
        week,
        ?elapsed,
        "Updated video block"
    );

    Ok(())
}
