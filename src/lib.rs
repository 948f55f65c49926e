//! # chess-dataset-etl
//!
//! Ingests a player's complete chess.com game history, normalizes each
//! game into a player-relative record, and persists the result as a
//! GZIP-compressed Parquet dataset carrying provenance metadata. The
//! dashboard that visualizes the dataset is an external consumer: it
//! reads the Parquet file and decodes the embedded metadata, nothing
//! more is shared with it.
//!
//! ## Architecture
//!
//! ```text
//! chess.com public API
//!     │
//!     ├── ArchiveClient (fetch/)     archive index + monthly archives
//!     ├── RawSnapshot (fetch/)       raw_data.json intermediate artifact
//!     │
//!     ├── TagPairParser (pgn)        [TagName "TagValue"] header lines
//!     ├── Normalizer (transform/)    raw game → pre-perspective record
//!     ├── Perspective (transform/)   color, win/loss/draw, opponent
//!     ├── Localizer (transform/)     UTC pair → local-zone pair
//!     │
//!     ├── MetadataCodec (dataset/)   provenance JSON ↔ schema metadata
//!     └── DatasetWriter (dataset/)   fixed-schema Parquet, atomic write
//! ```

pub mod config;
pub mod dataset;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod pgn;
pub mod service;
pub mod transform;
