//! Dataset layer: output schema, metadata codec, and Parquet writer.

pub mod codec;
pub mod schema;
pub mod writer;
