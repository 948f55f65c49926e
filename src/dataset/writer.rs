//! Parquet dataset writer.
//!
//! Assembles the final records into a single record batch against the
//! fixed output schema and writes one GZIP-compressed Parquet file with
//! the provenance metadata embedded in the schema metadata. The file is
//! written to a temporary sibling path and atomically renamed into
//! place, so the final path only ever holds a complete dataset.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use parquet::format::KeyValue;

use super::{codec, schema};
use crate::domain::{DatasetMetadata, GameRecord};
use crate::error::{PipelineError, Result};

/// Writes the dataset to `path`.
///
/// `records` must already be in final row order (end local date, then
/// end local time); the writer serializes them verbatim.
///
/// # Errors
///
/// Returns [`PipelineError::Io`] on any assembly or write failure. The
/// temporary file is removed on failure; a partial file is never left at
/// the final path.
pub fn write_dataset(
    records: &[GameRecord],
    metadata: &DatasetMetadata,
    path: &Path,
) -> Result<()> {
    let schema = schema::output_schema();
    let batch = build_batch(&schema, records)?;
    let existing: BTreeMap<String, String> = schema.metadata().clone().into_iter().collect();
    let props = writer_properties(&existing, metadata)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let temp_path = path.with_extension("parquet.tmp");

    let written = write_file(&temp_path, &batch, props);
    if written.is_err() {
        // Never leave a partial artifact behind.
        let _ = fs::remove_file(&temp_path);
        return written;
    }

    fs::rename(&temp_path, path)?;
    tracing::info!(path = %path.display(), rows = records.len(), "wrote dataset");
    Ok(())
}

fn write_file(temp_path: &Path, batch: &RecordBatch, props: WriterProperties) -> Result<()> {
    let file = File::create(temp_path)?;
    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), Some(props)).map_err(io_error)?;
    writer.write(batch).map_err(io_error)?;
    writer.close().map_err(io_error)?;
    Ok(())
}

/// GZIP compression plus the merged key-value metadata.
fn writer_properties(
    existing: &BTreeMap<String, String>,
    metadata: &DatasetMetadata,
) -> Result<WriterProperties> {
    let encoded = codec::encode(metadata)?;
    let combined = codec::attach(existing, &encoded)?;

    let key_values: Vec<KeyValue> = combined
        .into_iter()
        .map(|(key, value)| KeyValue {
            key,
            value: Some(value),
        })
        .collect();

    Ok(WriterProperties::builder()
        .set_compression(Compression::GZIP(Default::default()))
        .set_key_value_metadata(Some(key_values))
        .build())
}

/// Builds the record batch, checking the column layout against the
/// schema at assembly time.
fn build_batch(
    schema: &Arc<arrow::datatypes::Schema>,
    records: &[GameRecord],
) -> Result<RecordBatch> {
    let strings = |f: fn(&GameRecord) -> &str| {
        StringArray::from(records.iter().map(|r| Some(f(r))).collect::<Vec<_>>())
    };
    let ints =
        |f: fn(&GameRecord) -> i64| Int64Array::from(records.iter().map(f).collect::<Vec<_>>());

    let eco = StringArray::from(records.iter().map(|r| r.eco.as_deref()).collect::<Vec<_>>());
    let won_points =
        Float64Array::from(records.iter().map(|r| r.won_points).collect::<Vec<_>>());

    RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(ints(|r| r.game_id.get())),
            Arc::new(strings(|r| &r.start_date_local)),
            Arc::new(strings(|r| &r.start_time_local)),
            Arc::new(strings(|r| &r.end_date_local)),
            Arc::new(strings(|r| &r.end_time_local)),
            Arc::new(strings(|r| &r.event)),
            Arc::new(strings(|r| &r.site)),
            Arc::new(strings(|r| &r.time_class)),
            Arc::new(strings(|r| &r.time_control)),
            Arc::new(strings(|r| &r.result)),
            Arc::new(strings(|r| &r.result_str)),
            Arc::new(strings(|r| &r.termination)),
            Arc::new(eco),
            Arc::new(strings(|r| &r.name)),
            Arc::new(strings(|r| r.color.as_str())),
            Arc::new(ints(|r| r.is_white)),
            Arc::new(ints(|r| r.is_black)),
            Arc::new(ints(|r| r.rating)),
            Arc::new(ints(|r| r.is_win)),
            Arc::new(ints(|r| r.is_loss)),
            Arc::new(ints(|r| r.is_draw)),
            Arc::new(won_points),
            Arc::new(strings(|r| &r.opp_name)),
            Arc::new(ints(|r| r.opp_rating)),
        ],
    )
    .map_err(io_error)
}

fn io_error<E: std::fmt::Display>(e: E) -> PipelineError {
    PipelineError::Io(std::io::Error::other(e.to_string()))
}
