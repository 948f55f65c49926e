//! Service layer: run orchestration.

pub mod pipeline;

pub use pipeline::{Pipeline, RunSummary};
