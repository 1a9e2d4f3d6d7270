//! SFFL Beat Reporter
//!
//! Polls the Sleeper API for league transactions and posts recaps to
//! Bluesky. Exit code is zero on success, including "nothing to post";
//! missing required configuration fails before any network call.

use anyhow::{Context, Result};
use beat_reporter_service::{
    initialize_logging, Cli, Commands, Pipeline, ReporterConfig, RunMode,
};
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ReporterConfig::from_env();
    config.apply_cli(&cli);

    initialize_logging(config.verbose)?;
    config.validate().context("Invalid configuration")?;

    let mode = match cli.command {
        Commands::Realtime => RunMode::Realtime,
        Commands::Daily => RunMode::DailyDigest,
        Commands::Rumors => RunMode::WeeklyRumors,
    };
    info!("Starting beat reporter ({mode:?}, dry_run={})", config.dry_run);

    let pipeline = Pipeline::new(config)?;
    pipeline.run(mode, cli.force).await
}
