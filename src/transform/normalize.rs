//! Raw game normalization.
//!
//! Converts one [`RawGame`] and its extracted tag pairs into the
//! pre-perspective fields of a dataset row. Purely deterministic:
//! normalizing the same raw game twice yields identical output.

use crate::domain::{GameId, PreRecord, RawGame};
use crate::error::{PipelineError, Result};
use crate::pgn::TagPairs;

/// Tag pairs every retained game must carry.
///
/// `ECO` is deliberately absent from this list: chess.com omits it when
/// a game ended before any move was played.
pub const REQUIRED_TAGS: [&str; 13] = [
    "Event",
    "Site",
    "UTCDate",
    "StartTime",
    "EndDate",
    "EndTime",
    "White",
    "WhiteElo",
    "Black",
    "BlackElo",
    "TimeControl",
    "Result",
    "Termination",
];

/// Normalizes one raw game into its pre-perspective record fields.
///
/// # Errors
///
/// Returns [`PipelineError::Format`] if a required tag is missing, a
/// rating is non-numeric, or the game URL has no numeric final segment.
pub fn normalize(game: &RawGame, tags: &TagPairs) -> Result<PreRecord> {
    let game_id = GameId::from_url(&game.url)?;

    let tag = |name: &str| -> Result<String> {
        tags.get(name)
            .cloned()
            .ok_or_else(|| PipelineError::missing_tag(name))
    };

    let termination_raw = tag("Termination")?;
    // Raw terminations read "alice won by checkmate"; keep the last word.
    let termination = termination_raw
        .split_whitespace()
        .next_back()
        .unwrap_or_default()
        .to_string();

    Ok(PreRecord {
        game_id,
        event: tag("Event")?,
        site: tag("Site")?,
        // The dialect has no StartDate tag; UTCDate is the start date.
        start_date_utc: tag("UTCDate")?,
        start_time_utc: tag("StartTime")?,
        end_date_utc: tag("EndDate")?,
        end_time_utc: tag("EndTime")?,
        white_name: tag("White")?,
        white_rating: parse_rating("WhiteElo", &tag("WhiteElo")?)?,
        black_name: tag("Black")?,
        black_rating: parse_rating("BlackElo", &tag("BlackElo")?)?,
        time_control: tag("TimeControl")?,
        time_class: game.time_class.clone(),
        result: tag("Result")?,
        termination,
        eco: tags.get("ECO").cloned(),
    })
}

/// Parses a rating tag value as an integer.
fn parse_rating(tag: &str, value: &str) -> Result<i64> {
    value.parse::<i64>().map_err(|_| {
        PipelineError::Format(format!("tag {tag:?} has non-numeric value {value:?}"))
    })
}
