//! Domain layer: core record types and provenance metadata.
//!
//! This module contains the pipeline's data model: game identity, raw
//! games as fetched, normalized record types with their player-relative
//! vocabulary, and the provenance metadata embedded in the output.

pub mod game_id;
pub mod metadata;
pub mod raw_game;
pub mod record;

pub use game_id::GameId;
pub use metadata::{DatasetMetadata, FetchMetadata};
pub use raw_game::{ArchiveGames, ArchiveIndex, RawGame};
pub use record::{Color, GameOutcome, GameRecord, LocalPair, PlayerPerspective, PreRecord};
