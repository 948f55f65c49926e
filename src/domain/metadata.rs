//! Provenance metadata carried alongside the dataset.
//!
//! [`FetchMetadata`] is created once per run at fetch time and stored in
//! the raw snapshot; [`DatasetMetadata`] extends it with the timezone the
//! timestamps were localized to and is embedded verbatim into the final
//! Parquet file's schema metadata. It is the sole channel by which the
//! downstream consumer learns which player, which timezone, and when the
//! data was fetched.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Format of the `fetch_timestamp` field.
const FETCH_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Provenance recorded at fetch time.
///
/// Immutable after creation within a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchMetadata {
    /// chess.com username the data belongs to.
    pub player_name: String,
    /// Timezone of the raw data as fetched. Always `UTC`, matching the
    /// tag pairs in the source PGNs.
    pub raw_data_tz: String,
    /// When the fetch ran, formatted `%Y-%m-%d %H:%M:%S` in UTC.
    pub fetch_timestamp: String,
}

impl FetchMetadata {
    /// Creates the per-run fetch metadata, stamped with the current UTC
    /// time.
    #[must_use]
    pub fn new(player: &str) -> Self {
        Self {
            player_name: player.to_string(),
            raw_data_tz: "UTC".to_string(),
            fetch_timestamp: Utc::now().format(FETCH_TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Provenance embedded in the final dataset.
///
/// The fetch-time record plus the timezone the output timestamps were
/// localized to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    /// chess.com username the data belongs to.
    pub player_name: String,
    /// Timezone of the raw data as fetched (always `UTC`).
    pub raw_data_tz: String,
    /// When the fetch ran.
    pub fetch_timestamp: String,
    /// IANA timezone the local date/time columns are expressed in.
    pub timestamps_localized_to: String,
}

impl DatasetMetadata {
    /// Extends fetch metadata with the localization target.
    #[must_use]
    pub fn from_fetch(fetch: FetchMetadata, local_tz: &str) -> Self {
        Self {
            player_name: fetch.player_name,
            raw_data_tz: fetch.raw_data_tz,
            fetch_timestamp: fetch.fetch_timestamp,
            timestamps_localized_to: local_tz.to_string(),
        }
    }
}
