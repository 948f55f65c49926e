//! Fetch layer: archive API client and the raw snapshot artifact.

pub mod client;
pub mod snapshot;

pub use client::ArchiveClient;
pub use snapshot::RawSnapshot;
