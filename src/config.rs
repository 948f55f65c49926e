//! Pipeline configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). CLI argument parsing is deliberately
//! out of scope; the environment is the run-parameter surface.

use std::path::PathBuf;

/// Default base URL of the chess.com public data API.
pub const DEFAULT_API_BASE: &str = "https://api.chess.com";

/// Top-level pipeline configuration.
///
/// Loaded once at startup via [`PipelineConfig::from_env`].
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// chess.com username whose game history is fetched.
    pub player: String,

    /// IANA timezone identifier the output timestamps are localized to.
    pub local_tz: String,

    /// Base URL of the archive API (overridable for tests).
    pub api_base: String,

    /// Path of the intermediate raw-games JSON artifact.
    pub raw_path: PathBuf,

    /// Path of the final Parquet dataset.
    pub dataset_path: PathBuf,

    /// Per-request HTTP timeout in seconds.
    pub http_timeout_secs: u64,
}

impl PipelineConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults for everything except the player
    /// name. Calls `dotenvy::dotenv().ok()` to optionally load a `.env`
    /// file.
    ///
    /// # Errors
    ///
    /// Returns an error if `CHESS_PLAYER` is not set: there is no
    /// meaningful default player to fetch.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let player = std::env::var("CHESS_PLAYER")
            .map_err(|_| "CHESS_PLAYER must be set to the chess.com username to fetch")?;

        let local_tz = std::env::var("CHESS_LOCAL_TZ").unwrap_or_else(|_| "UTC".to_string());
        let api_base =
            std::env::var("CHESS_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        let raw_path = std::env::var("CHESS_RAW_PATH")
            .map_or_else(|_| PathBuf::from("data/raw_data.json"), PathBuf::from);
        let dataset_path = std::env::var("CHESS_DATASET_PATH")
            .map_or_else(|_| PathBuf::from("data/games.parquet"), PathBuf::from);

        let http_timeout_secs = parse_env("CHESS_HTTP_TIMEOUT_SECS", 30);

        Ok(Self {
            player,
            local_tz,
            api_base,
            raw_path,
            dataset_path,
            http_timeout_secs,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
