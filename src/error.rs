//! Pipeline error taxonomy.
//!
//! [`PipelineError`] is the central error type for the ingestion
//! pipeline. Every variant aborts the run: there is no retry or partial
//! recovery, re-running the whole pipeline from scratch is the recovery
//! mechanism. The final dataset file is either fully written or absent.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Failure conditions of the ingestion pipeline.
///
/// # Taxonomy
///
/// | Variant           | Condition                                       |
/// |-------------------|-------------------------------------------------|
/// | `Lookup`          | Unknown player or unreachable/malformed index   |
/// | `Fetch`           | A monthly archive request failed                |
/// | `Parse`           | Malformed PGN header line                       |
/// | `Format`          | Non-numeric rating or id segment, missing tag, unknown result token |
/// | `DuplicateGameId` | Two fetched games share one game id             |
/// | `Timezone`        | Unrecognized IANA timezone identifier           |
/// | `Io` / `Json`     | Artifact read/write or encode/decode failure    |
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The archive index for the player could not be resolved.
    #[error("could not get games archive for player {player}: {reason}")]
    Lookup {
        /// Player identifier the index lookup was keyed by.
        player: String,
        /// What went wrong with the lookup.
        reason: String,
    },

    /// A monthly archive request failed or returned malformed content.
    #[error("can't read archive url {url}: {reason}")]
    Fetch {
        /// The archive locator that failed.
        url: String,
        /// What went wrong with the fetch.
        reason: String,
    },

    /// A PGN header line did not match the `[Name "Value"]` grammar.
    #[error("malformed pgn header line: {line:?}")]
    Parse {
        /// The offending header line, verbatim.
        line: String,
    },

    /// A tag value or identifier segment could not be interpreted.
    #[error("format error: {0}")]
    Format(String),

    /// Two fetched games resolved to the same game id.
    ///
    /// Duplicate ids in the source data are a defect, never silently
    /// deduplicated.
    #[error("duplicate game id {0} in fetched data")]
    DuplicateGameId(i64),

    /// The target timezone identifier is not a known IANA zone.
    #[error("unrecognized timezone identifier: {0}")]
    Timezone(String),

    /// Reading or writing a pipeline artifact failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding of an artifact failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    /// Builds a [`PipelineError::Format`] for a missing required tag.
    #[must_use]
    pub fn missing_tag(tag: &str) -> Self {
        Self::Format(format!("required tag pair {tag:?} is missing"))
    }
}
