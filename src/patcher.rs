//! In-place patching of the page's generated video block.
//!
//! The target file is hand-authored HTML except for two machine-owned
//! spans: a `const CACHED_VIDEOS = [...]` assignment and an optional
//! `// Last updated: Week N` marker comment. This module rewrites both by
//! pattern match on the raw text and leaves every other byte untouched.
//!
//! # Wire Format
//!
//! The block's exact textual shape is a contract shared with the extraction
//! patterns below; changing one without the other is a breaking change:
//!
//! ```text
//! const CACHED_VIDEOS = [
//!   {
//!     "videoId": "<id>",
//!     "title": "<escaped title>"
//!   },
//!   ...
//! ];
//! ```
//!
//! Titles must not contain `]`: the extraction pattern scans to the first
//! closing bracket, so a `]` inside a record would make the next run fail
//! to locate its own block. The escaping in [`crate::models::escape_title`]
//! covers quotes only, matching what video titles contain in practice.
//!
//! Patching is a pure text transformation; the caller owns file I/O, so a
//! failed patch never half-writes the file.

use crate::models::VideoEntry;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use thiserror::Error;
use tracing::warn;

/// The identifier the page uses for its embedded video list.
const CACHE_IDENT: &str = "CACHED_VIDEOS";

/// Matches the full generated assignment, contents spanning any number of
/// lines, up to the first `];`.
static CACHE_BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"const CACHED_VIDEOS\s*=\s*\[[^\]]*\];").expect("valid cache block pattern")
});

/// Narrower fallback for a freshly scaffolded page.
static EMPTY_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"const CACHED_VIDEOS = \[\];").expect("valid empty block pattern"));

/// Matches the week marker comment.
static WEEK_COMMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"// Last updated: Week \d+").expect("valid week comment pattern"));

/// Errors raised while locating the generated block.
#[derive(Debug, Error)]
pub enum PatchError {
    /// Neither the full nor the empty-array assignment pattern matched.
    #[error(
        "no `const {CACHE_IDENT} = [...]` assignment (or empty `const {CACHE_IDENT} = [];` \
         fallback) found in the target file"
    )]
    BlockNotFound,
}

/// Render the entries as the page's array-literal assignment.
pub fn render_cache_block(entries: &[VideoEntry]) -> String {
    let records = entries
        .iter()
        .map(|v| {
            format!(
                "  {{\n    \"videoId\": \"{}\",\n    \"title\": \"{}\"\n  }}",
                v.video_id, v.title
            )
        })
        .join(",\n");
    format!("const {CACHE_IDENT} = [\n{records}\n];")
}

/// Replace the generated block and the week marker in `content`.
///
/// The assignment span is replaced with [`render_cache_block`]'s output; a
/// missing assignment is fatal. The week marker is updated when present and
/// silently skipped when absent. All other text is returned byte-for-byte.
///
/// # Errors
///
/// [`PatchError::BlockNotFound`] when no recognizable assignment exists.
/// Nothing is returned on failure, so the caller has nothing to write.
pub fn patch_index(
    content: &str,
    entries: &[VideoEntry],
    week: u32,
) -> Result<String, PatchError> {
    let block = render_cache_block(entries);

    // NoExpand keeps `$` in video titles literal.
    let replaced = if CACHE_BLOCK_RE.is_match(content) {
        CACHE_BLOCK_RE.replace(content, NoExpand(&block)).into_owned()
    } else if EMPTY_BLOCK_RE.is_match(content) {
        warn!("Full block pattern missed; replacing empty-array fallback");
        EMPTY_BLOCK_RE.replace(content, NoExpand(&block)).into_owned()
    } else {
        return Err(PatchError::BlockNotFound);
    };

    let marker = format!("// Last updated: Week {week}");
    Ok(WEEK_COMMENT_RE
        .replace(&replaced, NoExpand(&marker))
        .into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, title: &str) -> VideoEntry {
        VideoEntry::new(id.to_string(), title)
    }

    const PAGE: &str = "<html>\n<script>\n// Last updated: Week 3\nconst CACHED_VIDEOS = [\n  {\n    \"videoId\": \"old\",\n    \"title\": \"stale\"\n  }\n];\nconst OTHER = [1];\n</script>\n</html>\n";

    #[test]
    fn test_patch_replaces_block_and_preserves_surroundings() {
        let entries = vec![entry("abc", "first"), entry("def", "second")];
        let patched = patch_index(PAGE, &entries, 7).unwrap();

        assert!(patched.starts_with("<html>\n<script>\n"));
        assert!(patched.ends_with("const OTHER = [1];\n</script>\n</html>\n"));
        assert!(patched.contains("\"videoId\": \"abc\""));
        assert!(patched.contains("\"videoId\": \"def\""));
        assert!(!patched.contains("stale"));
        assert_eq!(patched.matches("\"videoId\":").count(), 2);
    }

    #[test]
    fn test_patch_updates_week_comment() {
        let patched = patch_index(PAGE, &[entry("abc", "t")], 7).unwrap();
        assert!(patched.contains("// Last updated: Week 7"));
        assert!(!patched.contains("Week 3"));
    }

    #[test]
    fn test_patch_without_week_comment_is_fine() {
        let page = "const CACHED_VIDEOS = [\n];\nrest";
        let patched = patch_index(page, &[entry("abc", "t")], 9).unwrap();
        assert!(patched.ends_with("rest"));
        assert!(!patched.contains("Last updated"));
    }

    #[test]
    fn test_patch_empty_array_scaffold() {
        let page = "before\nconst CACHED_VIDEOS = [];\nafter";
        let patched = patch_index(page, &[entry("abc", "t")], 1).unwrap();
        assert!(patched.starts_with("before\n"));
        assert!(patched.ends_with("\nafter"));
        assert!(patched.contains("\"videoId\": \"abc\""));
    }

    #[test]
    fn test_patch_missing_block_is_fatal() {
        let err = patch_index("<html>no block here</html>", &[entry("a", "t")], 1).unwrap_err();
        assert!(matches!(err, PatchError::BlockNotFound));
        assert!(err.to_string().contains("CACHED_VIDEOS"));
    }

    #[test]
    fn test_patch_with_no_entries_writes_empty_block() {
        let patched = patch_index(PAGE, &[], 5).unwrap();

        assert!(patched.starts_with("<html>\n<script>\n"));
        assert!(patched.ends_with("const OTHER = [1];\n</script>\n</html>\n"));
        assert_eq!(patched.matches("\"videoId\":").count(), 0);
        assert!(patched.contains("// Last updated: Week 5"));
        // The next run must still find the block it wrote.
        assert!(CACHE_BLOCK_RE.is_match(&patched));
    }

    #[test]
    fn test_patch_is_idempotent_in_structure() {
        let entries = vec![entry("abc", "first")];
        let once = patch_index(PAGE, &entries, 7).unwrap();
        let twice = patch_index(&once, &entries, 7).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_dollar_sign_in_title_stays_literal() {
        let entries = vec![entry("abc", "earn $100 a day")];
        let patched = patch_index(PAGE, &entries, 2).unwrap();
        assert!(patched.contains("earn $100 a day"));
    }

    #[test]
    fn test_render_cache_block_shape() {
        let block = render_cache_block(&[entry("abc", "a title")]);
        assert_eq!(
            block,
            "const CACHED_VIDEOS = [\n  {\n    \"videoId\": \"abc\",\n    \"title\": \"a title\"\n  }\n];"
        );
    }

    #[test]
    fn test_rendered_block_matches_extraction_pattern() {
        // The wire format and the pattern must stay in lockstep.
        let block = render_cache_block(&[entry("abc", "a"), entry("def", "b")]);
        assert!(CACHE_BLOCK_RE.is_match(&block));
    }
}
