//! Transform layer: normalization, perspective derivation, and
//! timestamp localization.
//!
//! Each submodule is a pure function over its inputs; the pipeline
//! service wires them together per record.

pub mod localize;
pub mod normalize;
pub mod perspective;
