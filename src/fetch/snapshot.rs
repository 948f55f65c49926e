//! The intermediate raw-games artifact.
//!
//! After fetching, all retained games are written to a single JSON file
//! keyed by game id alongside the fetch metadata. Normalization reads
//! this artifact back rather than the network, so a formatting change
//! can be re-run without re-fetching. The artifact is internal to the
//! pipeline, not a public contract.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{FetchMetadata, GameId, RawGame};
use crate::error::{PipelineError, Result};

/// On-disk shape of `raw_data.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSnapshot {
    /// Retained games, keyed by game id.
    pub data: BTreeMap<GameId, RawGame>,
    /// Per-run fetch provenance.
    pub metadata: FetchMetadata,
}

impl RawSnapshot {
    /// Creates an empty snapshot carrying the run's fetch metadata.
    #[must_use]
    pub fn new(metadata: FetchMetadata) -> Self {
        Self {
            data: BTreeMap::new(),
            metadata,
        }
    }

    /// Inserts one retained game under its derived id.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Format`] if the game URL has no numeric
    /// final segment, or [`PipelineError::DuplicateGameId`] if the id is
    /// already present. Duplicate ids in the source are a defect; they
    /// are never silently collapsed.
    pub fn insert(&mut self, game: RawGame) -> Result<GameId> {
        let id = GameId::from_url(&game.url)?;
        if self.data.contains_key(&id) {
            return Err(PipelineError::DuplicateGameId(id.get()));
        }
        self.data.insert(id, game);
        Ok(id)
    }

    /// Number of retained games.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when no games were retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Writes the snapshot as JSON, creating parent directories as
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Io`] or [`PipelineError::Json`] on
    /// failure.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_vec(self)?;
        fs::write(path, body)?;
        tracing::info!(path = %path.display(), games = self.len(), "wrote raw snapshot");
        Ok(())
    }

    /// Reads a snapshot back from disk.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Io`] or [`PipelineError::Json`] on
    /// failure.
    pub fn read(path: &Path) -> Result<Self> {
        let body = fs::read(path)?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn raw(url: &str) -> RawGame {
        RawGame {
            url: url.to_string(),
            pgn: String::new(),
            time_class: "blitz".to_string(),
            rated: true,
            rules: "chess".to_string(),
        }
    }

    #[test]
    fn insert_keys_by_derived_id() {
        let mut snapshot = RawSnapshot::new(FetchMetadata::new("alice"));
        let Ok(id) = snapshot.insert(raw("https://www.chess.com/live/game/6071303142")) else {
            panic!("expected insert to succeed");
        };
        assert_eq!(id.get(), 6_071_303_142);
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn duplicate_id_is_a_defect() {
        let mut snapshot = RawSnapshot::new(FetchMetadata::new("alice"));
        let first = snapshot.insert(raw("https://www.chess.com/live/game/1"));
        assert!(first.is_ok());
        let second = snapshot.insert(raw("https://www.chess.com/live/game/1"));
        assert!(matches!(
            second,
            Err(PipelineError::DuplicateGameId(1))
        ));
    }

    #[test]
    fn round_trips_through_disk() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        let path = dir.path().join("nested").join("raw_data.json");

        let mut snapshot = RawSnapshot::new(FetchMetadata::new("alice"));
        let inserted = snapshot.insert(raw("https://www.chess.com/live/game/7"));
        assert!(inserted.is_ok());
        let written = snapshot.write(&path);
        assert!(written.is_ok());

        let Ok(read_back) = RawSnapshot::read(&path) else {
            panic!("expected snapshot to read back");
        };
        assert_eq!(read_back.len(), 1);
        assert_eq!(read_back.metadata.player_name, "alice");
        assert!(read_back.data.contains_key(&GameId::new(7)));
    }
}
