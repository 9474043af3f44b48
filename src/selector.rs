//! Weekly video selection.
//!
//! Each run picks a handful of search queries from a fixed multilingual
//! vocabulary, fetches candidate videos for each, and samples a final set
//! to embed in the page. The pick is seeded from the ISO week number so the
//! rotation has a weekly cadence.
//!
//! # Randomness
//!
//! All selection functions take a caller-supplied [`Rng`], so tests can pass
//! a seeded [`StdRng`] and get reproducible picks. The binary seeds from the
//! week number alone under `--deterministic`, and otherwise mixes OS entropy
//! into the week seed so consecutive runs within one week still vary.
//!
//! # Failure Containment
//!
//! A failed search contributes zero results for that query and the run
//! continues; the returned list is simply whatever the remaining queries
//! produced. Deciding what an empty result means is left to the caller.

use crate::api::SearchProvider;
use crate::models::{SearchItem, VideoEntry};
use chrono::{Datelike, NaiveDate};
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

/// The search vocabulary: "day in the life at work" phrased across many
/// languages, so the rotation surfaces videos from all over the world.
pub const SEARCH_QUERIES: &[&str] = &[
    "day in the life worker",
    "a day in my life job",
    "día en la vida trabajo",
    "un día en mi vida trabajo",
    "día de trabajo en mi vida",
    "mi trabajo diario",
    "journée dans la vie travail",
    "une journée de travail",
    "journée de travail en Afrique",
    "mon travail quotidien",
    "Tag im Leben Arbeit",
    "仕事の一日",
    "工作中的一天",
    "我的工作日常",
    "职业日常",
    "dia na vida trabalho",
    "rotina de trabalho",
    "день из жизни работа",
    "мой рабочий день",
    "giorno nella vita lavoro",
    "직장인 하루",
    "일상 브이로그 직장",
    "يوم في الحياة عمل",
    "dag in het leven werk",
    "dzień w życiu praca",
    "how I dey work",
    "my work for Nigeria",
    "วันทำงานของฉัน",
    "एक दिन मेरी नौकरी",
    "mijn dagelijks werk",
    "τη δουλειά μου",
    "işimde bir gün",
    "pekerjaan sehari-hari",
    "việc làm hàng ngày",
];

/// Number of queries issued per run.
pub const QUERIES_PER_RUN: usize = 4;

/// Maximum number of entries written into the page.
pub const VIDEOS_PER_WEEK: usize = 12;

/// Results requested per query.
pub const RESULTS_PER_QUERY: u32 = 10;

/// ISO week-of-year for `date` (Thursday-anchored, resets per year).
pub fn week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// The numeric seed derived from a week number.
pub fn selection_seed(week: u32) -> u64 {
    u64::from(week) * 1000
}

/// Build the run's random number generator.
///
/// With `deterministic` set the generator is seeded from the week number
/// alone, so a re-run in the same week reproduces the same selection.
/// Otherwise OS entropy is mixed into the week seed.
pub fn selection_rng(week: u32, deterministic: bool) -> StdRng {
    let seed = if deterministic {
        selection_seed(week)
    } else {
        selection_seed(week) ^ rand::rng().random::<u64>()
    };
    StdRng::seed_from_u64(seed)
}

/// Pick `min(count, len)` distinct queries by uniform shuffle.
pub fn pick_queries<R: Rng>(rng: &mut R, queries: &[&str], count: usize) -> Vec<String> {
    let mut order: Vec<usize> = (0..queries.len()).collect();
    order.shuffle(rng);
    order
        .into_iter()
        .take(count)
        .map(|i| queries[i].to_string())
        .collect()
}

/// Run the full selection: pick queries, search each, then dedupe, shuffle,
/// and cap the merged results.
///
/// `query_delay` is inserted between successive provider calls to stay
/// under the API's rate limits; tests pass [`Duration::ZERO`].
///
/// # Returns
///
/// At most [`VIDEOS_PER_WEEK`] entries with unique video ids and titles
/// escaped for embedding. Empty when every query failed or matched nothing.
#[instrument(level = "info", skip_all)]
pub async fn select_videos<P, R>(
    provider: &P,
    rng: &mut R,
    queries: &[&str],
    query_delay: Duration,
) -> Vec<VideoEntry>
where
    P: SearchProvider,
    R: Rng,
{
    let selected = pick_queries(rng, queries, QUERIES_PER_RUN);
    info!(queries = ?selected, "Selected search queries");

    let mut collected: Vec<SearchItem> = Vec::new();
    for (i, query) in selected.iter().enumerate() {
        if i > 0 {
            sleep(query_delay).await;
        }
        match provider.search(query, RESULTS_PER_QUERY).await {
            Ok(items) => {
                debug!(count = items.len(), %query, "Collected search results");
                collected.extend(items);
            }
            Err(e) => {
                warn!(error = %e, %query, "Search failed; treating as zero results");
            }
        }
    }

    let mut unique: Vec<(String, String)> = collected
        .into_iter()
        .filter_map(|item| item.id.video_id.map(|id| (id, item.snippet.title)))
        .unique_by(|(id, _)| id.clone())
        .collect();
    let unique_count = unique.len();

    unique.shuffle(rng);
    unique.truncate(VIDEOS_PER_WEEK);

    info!(
        collected = unique_count,
        kept = unique.len(),
        "Sampled weekly video set"
    );

    unique
        .into_iter()
        .map(|(id, title)| VideoEntry::new(id, &title))
        .collect()
}
