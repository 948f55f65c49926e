//! HTTP client for the chess.com public archive API.
//!
//! Two read-only endpoints are consumed: the archive index, which maps a
//! player to their monthly archive URLs, and the archives themselves,
//! each holding one month of games. Requests are sequential and never
//! retried; any failure aborts the run.

use std::time::Duration;

use crate::domain::{ArchiveGames, ArchiveIndex, RawGame};
use crate::error::{PipelineError, Result};

/// Client over the chess.com public data API.
#[derive(Debug, Clone)]
pub struct ArchiveClient {
    http: reqwest::Client,
    api_base: String,
}

impl ArchiveClient {
    /// Creates a client against the given API base URL with a
    /// per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Io`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(api_base: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                PipelineError::Io(std::io::Error::other(format!(
                    "http client construction failed: {e}"
                )))
            })?;
        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Resolves the player's monthly archive locators.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Lookup`] if the player is unknown or the
    /// index endpoint is unreachable or returns a malformed body.
    pub async fn archives(&self, player: &str) -> Result<Vec<String>> {
        let url = format!("{}/pub/player/{player}/games/archives", self.api_base);
        let lookup = |reason: String| PipelineError::Lookup {
            player: player.to_string(),
            reason,
        };

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| lookup(e.to_string()))?;
        let index: ArchiveIndex = response.json().await.map_err(|e| lookup(e.to_string()))?;

        tracing::info!(player, archives = index.archives.len(), "resolved archive index");
        Ok(index.archives)
    }

    /// Fetches all raw games from one monthly archive.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Fetch`] naming the archive URL if the
    /// request fails or the body is malformed.
    pub async fn games(&self, archive_url: &str) -> Result<Vec<RawGame>> {
        let fetch = |reason: String| PipelineError::Fetch {
            url: archive_url.to_string(),
            reason,
        };

        let response = self
            .http
            .get(archive_url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| fetch(e.to_string()))?;
        let archive: ArchiveGames = response.json().await.map_err(|e| fetch(e.to_string()))?;

        tracing::debug!(url = %archive_url, games = archive.games.len(), "fetched archive");
        Ok(archive.games)
    }
}
