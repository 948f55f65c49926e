//! Type-safe game identifier.
//!
//! [`GameId`] is a newtype wrapper around the integer id chess.com embeds
//! as the final path segment of a game URL, providing type safety so that
//! game identifiers cannot be confused with ratings or other integers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Unique identifier for one game.
///
/// Derived deterministically from the canonical game URL
/// (`https://www.chess.com/live/game/6071303142` → `6071303142`).
/// Unique across the whole dataset; a collision in the fetched data is a
/// defect, not something to deduplicate silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(i64);

impl GameId {
    /// Creates a `GameId` from a raw integer.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Derives the id from a canonical game URL.
    ///
    /// Takes the final `/`-delimited segment and parses it as an integer.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Format`] if the final segment is missing
    /// or non-numeric.
    pub fn from_url(url: &str) -> Result<Self, PipelineError> {
        let segment = url
            .rsplit('/')
            .next()
            .ok_or_else(|| PipelineError::Format(format!("game url {url:?} has no path")))?;
        let id = segment.parse::<i64>().map_err(|_| {
            PipelineError::Format(format!(
                "game url {url:?} does not end in a numeric segment"
            ))
        })?;
        Ok(Self(id))
    }

    /// Returns the inner integer.
    #[must_use]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<GameId> for i64 {
    fn from(id: GameId) -> Self {
        id.0
    }
}
