//! Normalized game records and the perspective vocabulary.
//!
//! [`PreRecord`] holds the source-order fields extracted from one raw
//! game before any player-relative derivation. [`GameRecord`] is one row
//! of the final dataset, combining the pre-perspective fields with the
//! player perspective and the localized timestamp pairs.

use serde::{Deserialize, Serialize};

use super::GameId;
use crate::error::PipelineError;

/// Side of the board the tracked player occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    /// The tracked player played the white pieces.
    White,
    /// The tracked player played the black pieces.
    Black,
}

impl Color {
    /// Returns the column value (`"White"` / `"Black"`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Black => "Black",
        }
    }
}

/// Game outcome from the tracked player's perspective.
///
/// Derived from the result token and the player's color. Exactly one of
/// the one-hot indicators is set, always.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// The tracked player won.
    Win,
    /// The tracked player lost.
    Loss,
    /// The game was drawn.
    Draw,
}

impl GameOutcome {
    /// Derives the outcome from the PGN result token and the player's
    /// color.
    ///
    /// `1-0` is a white win, `0-1` a black win, `1/2-1/2` a draw.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Format`] on any other token (e.g. `*`
    /// for an unfinished game): an unknown token cannot be mapped onto
    /// the one-hot triple.
    pub fn derive(color: Color, result: &str) -> Result<Self, PipelineError> {
        match (color, result) {
            (Color::White, "1-0") | (Color::Black, "0-1") => Ok(Self::Win),
            (Color::White, "0-1") | (Color::Black, "1-0") => Ok(Self::Loss),
            (_, "1/2-1/2") => Ok(Self::Draw),
            _ => Err(PipelineError::Format(format!(
                "unrecognized result token {result:?}"
            ))),
        }
    }

    /// Returns the `result_str` column value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Win => "Win",
            Self::Loss => "Loss",
            Self::Draw => "Draw",
        }
    }

    /// Score contribution of the game: 1, 0, or 0.5.
    #[must_use]
    pub const fn won_points(&self) -> f64 {
        match self {
            Self::Win => 1.0,
            Self::Loss => 0.0,
            Self::Draw => 0.5,
        }
    }
}

/// Pre-perspective fields of one game, as extracted from the raw record
/// and its tag pairs.
///
/// Both sides are still symmetric here; the UTC date/time strings are
/// carried verbatim for later localization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreRecord {
    /// Unique game identifier.
    pub game_id: GameId,
    /// `Event` tag value.
    pub event: String,
    /// `Site` tag value.
    pub site: String,
    /// `UTCDate` tag value (there is no `StartDate` tag).
    pub start_date_utc: String,
    /// `StartTime` tag value.
    pub start_time_utc: String,
    /// `EndDate` tag value.
    pub end_date_utc: String,
    /// `EndTime` tag value.
    pub end_time_utc: String,
    /// White side's username.
    pub white_name: String,
    /// White side's rating.
    pub white_rating: i64,
    /// Black side's username.
    pub black_name: String,
    /// Black side's rating.
    pub black_rating: i64,
    /// `TimeControl` tag value.
    pub time_control: String,
    /// Time class label from the raw record.
    pub time_class: String,
    /// `Result` tag token.
    pub result: String,
    /// Last whitespace-delimited token of the `Termination` tag.
    pub termination: String,
    /// `ECO` opening code; absent when no moves were played.
    pub eco: Option<String>,
}

/// Player-relative fields derived from a [`PreRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerPerspective {
    /// The tracked player's name.
    pub name: String,
    /// Side the tracked player occupied.
    pub color: Color,
    /// Outcome from the tracked player's perspective.
    pub outcome: GameOutcome,
    /// The tracked player's side rating.
    pub rating: i64,
    /// The opponent's username.
    pub opp_name: String,
    /// The opponent's rating.
    pub opp_rating: i64,
}

/// A localized date/time pair produced by the timestamp localizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalPair {
    /// Local calendar date, `%Y-%m-%d`.
    pub date: String,
    /// Local wall-clock time, `%H:%M:%S`.
    pub time: String,
}

/// One row of the final dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    /// Unique game identifier.
    pub game_id: GameId,
    /// Local date the game started.
    pub start_date_local: String,
    /// Local time the game started.
    pub start_time_local: String,
    /// Local date the game ended. May differ from the start date (and
    /// from the UTC date) for games crossing midnight.
    pub end_date_local: String,
    /// Local time the game ended.
    pub end_time_local: String,
    /// `Event` tag value.
    pub event: String,
    /// `Site` tag value.
    pub site: String,
    /// Time class label.
    pub time_class: String,
    /// `TimeControl` tag value.
    pub time_control: String,
    /// Raw result token (`1-0`, `0-1`, `1/2-1/2`).
    pub result: String,
    /// Perspective result string (`Win`, `Loss`, `Draw`).
    pub result_str: String,
    /// Termination reason (last word of the raw tag).
    pub termination: String,
    /// `ECO` opening code, if any.
    pub eco: Option<String>,
    /// The tracked player's name.
    pub name: String,
    /// Side the tracked player occupied.
    pub color: Color,
    /// 1 iff the player was White.
    pub is_white: i64,
    /// 1 iff the player was Black.
    pub is_black: i64,
    /// The tracked player's side rating.
    pub rating: i64,
    /// 1 iff the player won.
    pub is_win: i64,
    /// 1 iff the player lost.
    pub is_loss: i64,
    /// 1 iff the game was drawn.
    pub is_draw: i64,
    /// Score contribution: 1, 0, or 0.5.
    pub won_points: f64,
    /// The opponent's username.
    pub opp_name: String,
    /// The opponent's rating.
    pub opp_rating: i64,
}

impl GameRecord {
    /// Assembles the final row from its three independently derived
    /// parts.
    #[must_use]
    pub fn assemble(
        pre: PreRecord,
        perspective: PlayerPerspective,
        start_local: LocalPair,
        end_local: LocalPair,
    ) -> Self {
        Self {
            game_id: pre.game_id,
            start_date_local: start_local.date,
            start_time_local: start_local.time,
            end_date_local: end_local.date,
            end_time_local: end_local.time,
            event: pre.event,
            site: pre.site,
            time_class: pre.time_class,
            time_control: pre.time_control,
            result: pre.result,
            result_str: perspective.outcome.as_str().to_string(),
            termination: pre.termination,
            eco: pre.eco,
            name: perspective.name,
            color: perspective.color,
            is_white: i64::from(perspective.color == Color::White),
            is_black: i64::from(perspective.color == Color::Black),
            rating: perspective.rating,
            is_win: i64::from(perspective.outcome == GameOutcome::Win),
            is_loss: i64::from(perspective.outcome == GameOutcome::Loss),
            is_draw: i64::from(perspective.outcome == GameOutcome::Draw),
            won_points: perspective.outcome.won_points(),
            opp_name: perspective.opp_name,
            opp_rating: perspective.opp_rating,
        }
    }

    /// Sort key for the dataset: end local date, then end local time.
    ///
    /// Both fields are ISO-formatted, so lexicographic order is
    /// chronological order.
    #[must_use]
    pub fn sort_key(&self) -> (&str, &str) {
        (&self.end_date_local, &self.end_time_local)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn outcome_follows_color_and_result() {
        assert_eq!(
            GameOutcome::derive(Color::White, "1-0").ok(),
            Some(GameOutcome::Win)
        );
        assert_eq!(
            GameOutcome::derive(Color::Black, "1-0").ok(),
            Some(GameOutcome::Loss)
        );
        assert_eq!(
            GameOutcome::derive(Color::Black, "0-1").ok(),
            Some(GameOutcome::Win)
        );
        assert_eq!(
            GameOutcome::derive(Color::White, "1/2-1/2").ok(),
            Some(GameOutcome::Draw)
        );
    }

    #[test]
    fn unknown_result_token_is_rejected() {
        let err = GameOutcome::derive(Color::White, "*");
        assert!(matches!(err, Err(PipelineError::Format(_))));
    }

    #[test]
    fn won_points_agrees_with_outcome() {
        assert!((GameOutcome::Win.won_points() - 1.0).abs() < f64::EPSILON);
        assert!((GameOutcome::Loss.won_points() - 0.0).abs() < f64::EPSILON);
        assert!((GameOutcome::Draw.won_points() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn assembled_record_has_one_hot_indicators() {
        let pre = PreRecord {
            game_id: GameId::new(1),
            event: "Live Chess".to_string(),
            site: "Chess.com".to_string(),
            start_date_utc: "2021.05.01".to_string(),
            start_time_utc: "10:00:00".to_string(),
            end_date_utc: "2021.05.01".to_string(),
            end_time_utc: "10:05:00".to_string(),
            white_name: "alice".to_string(),
            white_rating: 1500,
            black_name: "bob".to_string(),
            black_rating: 1600,
            time_control: "300".to_string(),
            time_class: "blitz".to_string(),
            result: "1-0".to_string(),
            termination: "checkmate".to_string(),
            eco: Some("B01".to_string()),
        };
        let perspective = PlayerPerspective {
            name: "alice".to_string(),
            color: Color::White,
            outcome: GameOutcome::Win,
            rating: 1500,
            opp_name: "bob".to_string(),
            opp_rating: 1600,
        };
        let pair = |d: &str, t: &str| LocalPair {
            date: d.to_string(),
            time: t.to_string(),
        };
        let record = GameRecord::assemble(
            pre,
            perspective,
            pair("2021-05-01", "10:00:00"),
            pair("2021-05-01", "10:05:00"),
        );

        assert_eq!(record.is_white + record.is_black, 1);
        assert_eq!(record.is_win + record.is_loss + record.is_draw, 1);
        assert_eq!(record.result_str, "Win");
        assert!((record.won_points - 1.0).abs() < f64::EPSILON);
    }
}
