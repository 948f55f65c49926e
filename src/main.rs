//! chess-dataset-etl entry point.
//!
//! Runs one full ingestion: fetch the player's archives, normalize the
//! games, and write the Parquet dataset.

use tracing_subscriber::EnvFilter;

use chess_dataset_etl::config::PipelineConfig;
use chess_dataset_etl::service::Pipeline;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = PipelineConfig::from_env().map_err(|e| anyhow::anyhow!(e.to_string()))?;
    tracing::info!(
        player = %config.player,
        tz = %config.local_tz,
        "starting chess-dataset-etl"
    );

    // Run the pipeline; any failure aborts without a partial dataset.
    let pipeline = Pipeline::new(config)?;
    let summary = pipeline.run().await?;

    tracing::info!(
        archives = summary.archives,
        games = summary.games,
        "run finished"
    );
    Ok(())
}
