//! Command-line interface definitions for Weekly Videos.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The API key can be provided via flag or environment variable; it is
//! required, and clap exits with a descriptive error before any work is done
//! when it is absent.

use clap::Parser;

/// Command-line arguments for the Weekly Videos updater.
///
/// # Examples
///
/// ```sh
/// # Basic usage, key from the environment
/// YOUTUBE_API_KEY=... weekly_videos
///
/// # Patch a file at a different path
/// weekly_videos --index-file site/index.html
///
/// # Reproducible selection for the current week
/// weekly_videos --deterministic
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path of the HTML file containing the CACHED_VIDEOS block
    #[arg(short, long, default_value = "index.html")]
    pub index_file: String,

    /// YouTube Data API key
    #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Seed selection from the week number alone, so repeated runs within
    /// the same calendar week pick the same queries and videos
    #[arg(long)]
    pub deterministic: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["weekly_videos", "--api-key", "test-key"]);

        assert_eq!(cli.index_file, "index.html");
        assert_eq!(cli.api_key, "test-key");
        assert!(!cli.deterministic);
    }

    #[test]
    fn test_cli_all_flags() {
        let cli = Cli::parse_from([
            "weekly_videos",
            "-i",
            "site/index.html",
            "--api-key",
            "test-key",
            "--deterministic",
        ]);

        assert_eq!(cli.index_file, "site/index.html");
        assert!(cli.deterministic);
    }

    #[test]
    fn test_cli_missing_api_key_is_an_error() {
        // Guard against the env var leaking into the test.
        unsafe { std::env::remove_var("YOUTUBE_API_KEY") };
        let result = Cli::try_parse_from(["weekly_videos"]);
        assert!(result.is_err());
    }
}
