//! The fixed output schema.
//!
//! One explicit, ordered schema object is the single source of truth for
//! the dataset's column layout. The writer assembles its record batch
//! against it, so a missing or extra column fails at assembly time
//! instead of silently misaligning.

use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema};

/// Builds the 24-column output schema, in final column order.
///
/// Only `eco` is nullable: chess.com omits the opening code when a game
/// ended before any move was played.
#[must_use]
pub fn output_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("game_id", DataType::Int64, false),
        Field::new("start_date_local", DataType::Utf8, false),
        Field::new("start_time_local", DataType::Utf8, false),
        Field::new("end_date_local", DataType::Utf8, false),
        Field::new("end_time_local", DataType::Utf8, false),
        Field::new("event", DataType::Utf8, false),
        Field::new("site", DataType::Utf8, false),
        Field::new("time_class", DataType::Utf8, false),
        Field::new("time_control", DataType::Utf8, false),
        Field::new("result", DataType::Utf8, false),
        Field::new("result_str", DataType::Utf8, false),
        Field::new("termination", DataType::Utf8, false),
        Field::new("eco", DataType::Utf8, true),
        Field::new("name", DataType::Utf8, false),
        Field::new("color", DataType::Utf8, false),
        Field::new("is_white", DataType::Int64, false),
        Field::new("is_black", DataType::Int64, false),
        Field::new("rating", DataType::Int64, false),
        Field::new("is_win", DataType::Int64, false),
        Field::new("is_loss", DataType::Int64, false),
        Field::new("is_draw", DataType::Int64, false),
        Field::new("won_points", DataType::Float64, false),
        Field::new("opp_name", DataType::Utf8, false),
        Field::new("opp_rating", DataType::Int64, false),
    ]))
}
