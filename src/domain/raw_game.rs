//! Raw game records as returned by the archive API.
//!
//! [`RawGame`] is an immutable bundle of the fields the pipeline needs
//! from one fetched game; unknown fields in the API response are ignored.
//! The filter predicate [`RawGame::is_standard_rated`] decides which
//! games enter the dataset at all.

use serde::{Deserialize, Serialize};

/// Rule-set label of games the pipeline keeps (standard chess, no
/// variants).
pub const STANDARD_RULES: &str = "chess";

/// One raw game as fetched from a monthly archive.
///
/// Immutable once fetched; discarded after normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawGame {
    /// Canonical game reference, e.g.
    /// `https://www.chess.com/live/game/6071303142`.
    pub url: String,

    /// Full PGN notation blob (header block + moves).
    pub pgn: String,

    /// Time class label (`"blitz"`, `"rapid"`, ...).
    pub time_class: String,

    /// Whether the game was rated.
    pub rated: bool,

    /// Rule-set label (`"chess"`, `"chess960"`, ...).
    pub rules: String,
}

impl RawGame {
    /// Pure filter predicate: retain iff the game was rated and played
    /// under standard rules.
    ///
    /// Non-conforming games (variants, unrated) carry incompatible
    /// schemas and are dropped silently, by design rather than defect.
    #[must_use]
    pub fn is_standard_rated(&self) -> bool {
        self.rated && self.rules == STANDARD_RULES
    }
}

/// Body of the archive-index endpoint:
/// `GET /pub/player/{player}/games/archives`.
#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveIndex {
    /// Monthly archive locators, one URL per month with games.
    pub archives: Vec<String>,
}

/// Body of one monthly archive: `GET <archive url>`.
#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveGames {
    /// All games of that month, in source order.
    pub games: Vec<RawGame>,
}
