//! Pipeline service: orchestrates the whole ingestion run.
//!
//! Sequential, fail-fast coordinator over the fetch, transform, and
//! dataset layers: archives are fetched one at a time, every record
//! failure aborts the run, and the output file appears only after a
//! fully successful run. The two stages communicate through the raw
//! snapshot artifact on disk, so the format stage can be re-run without
//! re-fetching.

use chrono_tz::Tz;

use crate::config::PipelineConfig;
use crate::dataset::writer;
use crate::domain::{DatasetMetadata, FetchMetadata, GameRecord};
use crate::error::Result;
use crate::fetch::{ArchiveClient, RawSnapshot};
use crate::pgn;
use crate::transform::{localize, normalize, perspective};

/// Counters reported after a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Monthly archives traversed.
    pub archives: usize,
    /// Games retained by the filter and written to the dataset.
    pub games: usize,
}

/// Orchestration layer for one ingestion run.
///
/// Owns the archive client and the run configuration; all intermediate
/// state lives on the stack of [`Pipeline::run`].
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    client: ArchiveClient,
}

impl Pipeline {
    /// Creates a pipeline for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let client = ArchiveClient::new(
            &config.api_base,
            std::time::Duration::from_secs(config.http_timeout_secs),
        )?;
        Ok(Self { config, client })
    }

    /// Runs the full pipeline: fetch, snapshot, normalize, write.
    ///
    /// # Errors
    ///
    /// Propagates the first failure of any stage; no partial dataset is
    /// ever written.
    pub async fn run(&self) -> Result<RunSummary> {
        let archives = self.fetch_stage().await?;
        let games = self.format_stage()?;
        Ok(RunSummary { archives, games })
    }

    /// Fetch stage: traverses all archives and writes the raw snapshot.
    ///
    /// Returns the number of archives traversed.
    ///
    /// # Errors
    ///
    /// Returns a lookup, fetch, format, or io error on the first
    /// failure.
    pub async fn fetch_stage(&self) -> Result<usize> {
        let player = &self.config.player;
        let mut snapshot = RawSnapshot::new(FetchMetadata::new(player));

        let archive_urls = self.client.archives(player).await?;
        for url in &archive_urls {
            for game in self.client.games(url).await? {
                // Only keep rated games with standard rules; other
                // games carry incompatible schemas.
                if game.is_standard_rated() {
                    snapshot.insert(game)?;
                }
            }
        }

        snapshot.write(&self.config.raw_path)?;
        Ok(archive_urls.len())
    }

    /// Format stage: reads the snapshot back, normalizes every game,
    /// and writes the sorted Parquet dataset.
    ///
    /// Returns the number of rows written.
    ///
    /// # Errors
    ///
    /// Returns a parse, format, timezone, or io error on the first
    /// failure.
    pub fn format_stage(&self) -> Result<usize> {
        let snapshot = RawSnapshot::read(&self.config.raw_path)?;
        let tz = localize::resolve_tz(&self.config.local_tz)?;

        let (records, metadata) = format_records(&snapshot, tz, &self.config.local_tz)?;
        writer::write_dataset(&records, &metadata, &self.config.dataset_path)?;

        tracing::info!(
            player = %metadata.player_name,
            tz = %metadata.timestamps_localized_to,
            rows = records.len(),
            "pipeline run complete"
        );
        Ok(records.len())
    }
}

/// Normalizes every snapshot game into a final record and sorts the
/// result into output order (end local date, then end local time).
///
/// The player identity is taken from the snapshot's own metadata, not
/// from ambient configuration: the artifact is self-describing.
///
/// # Errors
///
/// Returns the first parse, format, or localization error encountered.
pub fn format_records(
    snapshot: &RawSnapshot,
    tz: Tz,
    tz_name: &str,
) -> Result<(Vec<GameRecord>, DatasetMetadata)> {
    let player = &snapshot.metadata.player_name;
    let metadata = DatasetMetadata::from_fetch(snapshot.metadata.clone(), tz_name);

    let mut records = Vec::with_capacity(snapshot.len());
    for game in snapshot.data.values() {
        let tags = pgn::parse_tag_pairs(&game.pgn)?;
        let pre = normalize::normalize(game, &tags)?;
        let persp = perspective::derive(player, &pre)?;
        let start_local = localize::localize(&pre.start_date_utc, &pre.start_time_utc, tz)?;
        let end_local = localize::localize(&pre.end_date_utc, &pre.end_time_utc, tz)?;
        records.push(GameRecord::assemble(pre, persp, start_local, end_local));
    }

    records.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    Ok((records, metadata))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::RawGame;
    use crate::error::PipelineError;

    fn pgn(end_date: &str, end_time: &str, result: &str) -> String {
        format!(
            concat!(
                "[Event \"Live Chess\"]\n",
                "[Site \"Chess.com\"]\n",
                "[UTCDate \"2021.05.01\"]\n",
                "[StartTime \"10:00:00\"]\n",
                "[EndDate \"{end_date}\"]\n",
                "[EndTime \"{end_time}\"]\n",
                "[White \"alice\"]\n",
                "[WhiteElo \"1500\"]\n",
                "[Black \"bob\"]\n",
                "[BlackElo \"1600\"]\n",
                "[TimeControl \"300\"]\n",
                "[Result \"{result}\"]\n",
                "[Termination \"game ended by checkmate\"]\n",
                "\n",
                "1. e4 e5 {result}\n",
            ),
            end_date = end_date,
            end_time = end_time,
            result = result,
        )
    }

    fn raw(id: u64, pgn: String) -> RawGame {
        RawGame {
            url: format!("https://www.chess.com/live/game/{id}"),
            pgn,
            time_class: "blitz".to_string(),
            rated: true,
            rules: "chess".to_string(),
        }
    }

    fn snapshot(games: Vec<RawGame>) -> RawSnapshot {
        let mut snapshot = RawSnapshot::new(FetchMetadata::new("alice"));
        for game in games {
            let inserted = snapshot.insert(game);
            assert!(inserted.is_ok());
        }
        snapshot
    }

    fn utc() -> Tz {
        let Ok(tz) = localize::resolve_tz("UTC") else {
            panic!("UTC must resolve");
        };
        tz
    }

    #[test]
    fn records_are_sorted_by_end_date_then_end_time() {
        // Inserted ids are 3, 1, 2 but end instants order them 2, 3, 1.
        let snap = snapshot(vec![
            raw(3, pgn("2021.05.02", "09:00:00", "1-0")),
            raw(1, pgn("2021.05.02", "11:30:00", "1-0")),
            raw(2, pgn("2021.05.01", "23:59:00", "1-0")),
        ]);

        let Ok((records, _)) = format_records(&snap, utc(), "UTC") else {
            panic!("expected formatting to succeed");
        };
        let ids: Vec<i64> = records.iter().map(|r| r.game_id.get()).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn same_date_orders_by_end_time() {
        let snap = snapshot(vec![
            raw(1, pgn("2021.05.01", "18:00:00", "1-0")),
            raw(2, pgn("2021.05.01", "09:00:00", "1-0")),
        ]);

        let Ok((records, _)) = format_records(&snap, utc(), "UTC") else {
            panic!("expected formatting to succeed");
        };
        let times: Vec<&str> = records.iter().map(|r| r.end_time_local.as_str()).collect();
        assert_eq!(times, vec!["09:00:00", "18:00:00"]);
    }

    #[test]
    fn metadata_names_player_and_target_zone() {
        let snap = snapshot(vec![raw(1, pgn("2021.05.01", "10:05:00", "0-1"))]);
        let Ok((_, metadata)) = format_records(&snap, utc(), "UTC") else {
            panic!("expected formatting to succeed");
        };
        assert_eq!(metadata.player_name, "alice");
        assert_eq!(metadata.timestamps_localized_to, "UTC");
    }

    #[test]
    fn malformed_game_aborts_the_whole_batch() {
        let broken = pgn("2021.05.01", "10:05:00", "1-0")
            .replace("[Termination \"game ended by checkmate\"]\n", "");
        let snap = snapshot(vec![
            raw(1, pgn("2021.05.01", "10:05:00", "1-0")),
            raw(2, broken),
        ]);

        let err = format_records(&snap, utc(), "UTC");
        assert!(matches!(err, Err(PipelineError::Format(_))));
    }

    #[test]
    fn formatting_is_deterministic() {
        let snap = snapshot(vec![
            raw(1, pgn("2021.05.01", "10:05:00", "1-0")),
            raw(2, pgn("2021.05.01", "11:00:00", "1/2-1/2")),
        ]);

        let Ok((first, _)) = format_records(&snap, utc(), "UTC") else {
            panic!("expected formatting to succeed");
        };
        let Ok((second, _)) = format_records(&snap, utc(), "UTC") else {
            panic!("expected formatting to succeed");
        };
        assert_eq!(first, second);
    }
}
