//! Player-relative derivation.
//!
//! Turns the symmetric pre-perspective fields of a record into the
//! tracked player's view: which side they played, whether they won, and
//! who the opponent was.

use crate::domain::{Color, GameOutcome, PlayerPerspective, PreRecord};
use crate::error::Result;

/// Derives the player-relative fields for one record.
///
/// Color is White iff the white side's name equals `player` exactly
/// (case-sensitive). When neither side matches, the record is treated as
/// played with Black, and a diagnostic is logged: silent mismatch would
/// otherwise corrupt every derived field downstream.
///
/// # Errors
///
/// Returns [`crate::error::PipelineError::Format`] if the result token
/// is not one of `1-0`, `0-1`, `1/2-1/2`.
pub fn derive(player: &str, pre: &PreRecord) -> Result<PlayerPerspective> {
    if pre.white_name != player && pre.black_name != player {
        tracing::warn!(
            game_id = %pre.game_id,
            white = %pre.white_name,
            black = %pre.black_name,
            player,
            "neither side matches the requested player; assuming black"
        );
    }

    let color = if pre.white_name == player {
        Color::White
    } else {
        Color::Black
    };
    let outcome = GameOutcome::derive(color, &pre.result)?;

    let (rating, opp_name, opp_rating) = match color {
        Color::White => (pre.white_rating, pre.black_name.clone(), pre.black_rating),
        Color::Black => (pre.black_rating, pre.white_name.clone(), pre.white_rating),
    };

    Ok(PlayerPerspective {
        name: player.to_string(),
        color,
        outcome,
        rating,
        opp_name,
        opp_rating,
    })
}
