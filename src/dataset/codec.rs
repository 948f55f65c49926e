//! Provenance metadata codec.
//!
//! A pure `encode`/`decode` pair over [`DatasetMetadata`] plus a merge
//! rule over a plain string map, independent of any particular columnar
//! backend's metadata representation. The writer translates the merged
//! map into Parquet key-value metadata; a consumer applies the inverse
//! to get the provenance record back.

use std::collections::BTreeMap;

use crate::domain::DatasetMetadata;
use crate::error::{PipelineError, Result};

/// Fixed out-of-band key the encoded provenance lives under.
pub const METADATA_KEY: &str = "fetch_metadata";

/// Serializes the metadata to its compact JSON encoding.
///
/// # Errors
///
/// Returns [`PipelineError::Json`] if serialization fails.
pub fn encode(metadata: &DatasetMetadata) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(metadata)?)
}

/// Reconstructs the metadata from its encoding.
///
/// Inverse of [`encode`]: `decode(encode(m)) == m` for any metadata `m`.
///
/// # Errors
///
/// Returns [`PipelineError::Json`] if the bytes are not a valid
/// encoding.
pub fn decode(encoded: &[u8]) -> Result<DatasetMetadata> {
    Ok(serde_json::from_slice(encoded)?)
}

/// Merges the encoded provenance into a table's existing metadata map.
///
/// All pre-existing entries are kept; the entry under [`METADATA_KEY`]
/// is set to the encoded bytes, taking precedence if that key already
/// existed.
///
/// # Errors
///
/// Returns [`PipelineError::Format`] if the encoded bytes are not valid
/// UTF-8 (JSON encodings always are).
pub fn attach(
    existing: &BTreeMap<String, String>,
    encoded: &[u8],
) -> Result<BTreeMap<String, String>> {
    let value = std::str::from_utf8(encoded)
        .map_err(|_| PipelineError::Format("encoded metadata is not valid utf-8".to_string()))?;

    let mut combined = existing.clone();
    combined.insert(METADATA_KEY.to_string(), value.to_string());
    Ok(combined)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::FetchMetadata;

    fn metadata() -> DatasetMetadata {
        DatasetMetadata::from_fetch(
            FetchMetadata {
                player_name: "alice".to_string(),
                raw_data_tz: "UTC".to_string(),
                fetch_timestamp: "2021-05-01 12:00:00".to_string(),
            },
            "Europe/Stockholm",
        )
    }

    #[test]
    fn encode_decode_round_trips() {
        let m = metadata();
        let Ok(encoded) = encode(&m) else {
            panic!("encode failed");
        };
        let Ok(decoded) = decode(&encoded) else {
            panic!("decode failed");
        };
        assert_eq!(decoded, m);
    }

    #[test]
    fn attach_preserves_existing_entries() {
        let m = metadata();
        let Ok(encoded) = encode(&m) else {
            panic!("encode failed");
        };
        let mut existing = BTreeMap::new();
        existing.insert("created_by".to_string(), "pandas".to_string());

        let Ok(combined) = attach(&existing, &encoded) else {
            panic!("attach failed");
        };
        assert_eq!(combined.len(), 2);
        assert_eq!(combined.get("created_by").map(String::as_str), Some("pandas"));
    }

    #[test]
    fn attach_round_trips_through_the_map() {
        let m = metadata();
        let Ok(encoded) = encode(&m) else {
            panic!("encode failed");
        };
        let Ok(combined) = attach(&BTreeMap::new(), &encoded) else {
            panic!("attach failed");
        };
        let Some(entry) = combined.get(METADATA_KEY) else {
            panic!("metadata key missing");
        };
        let Ok(decoded) = decode(entry.as_bytes()) else {
            panic!("decode failed");
        };
        assert_eq!(decoded, m);
    }

    #[test]
    fn fetch_metadata_entry_takes_precedence() {
        let m = metadata();
        let Ok(encoded) = encode(&m) else {
            panic!("encode failed");
        };
        let mut existing = BTreeMap::new();
        existing.insert(METADATA_KEY.to_string(), "stale".to_string());

        let Ok(combined) = attach(&existing, &encoded) else {
            panic!("attach failed");
        };
        assert_eq!(combined.len(), 1);
        let Some(entry) = combined.get(METADATA_KEY) else {
            panic!("metadata key missing");
        };
        assert_ne!(entry, "stale");
    }
}
