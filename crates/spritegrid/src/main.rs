mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use spritegrid_core::pipeline;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = cli::Cli::parse();

    info!(input = ?cli.input, "starting conversion");

    let out_dir = std::env::current_dir().context("failed to resolve working directory")?;
    let summary =
        pipeline::run_pipeline(&cli.input, &out_dir).context("conversion failed")?;

    info!(
        frame_count = summary.frame_count,
        side_length = summary.side_length,
        fps = summary.fps,
        sheet = ?summary.sheet_path,
        metadata = ?summary.metadata_path,
        "conversion complete"
    );

    Ok(())
}
