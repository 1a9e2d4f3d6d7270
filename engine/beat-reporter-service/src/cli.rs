//! Command line interface

use clap::{Parser, Subcommand};

/// League beat reporter: posts Sleeper transaction recaps to Bluesky
#[derive(Parser)]
#[command(name = "beat-reporter")]
#[command(about = "Posts Sleeper fantasy league transaction recaps to Bluesky")]
pub struct Cli {
    /// Sleeper league id (overrides SLEEPER_LEAGUE_ID)
    #[arg(long)]
    pub league_id: Option<String>,

    /// Manual week override (falls back to the live lookup when out of range)
    #[arg(long)]
    pub week: Option<u32>,

    /// Validate and print instead of posting
    #[arg(long)]
    pub dry_run: bool,

    /// Debug-level logging
    #[arg(long)]
    pub verbose: bool,

    /// Skip the local-hour scheduling guard
    #[arg(long)]
    pub force: bool,

    /// Run mode
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Post every not-yet-published transaction, oldest id first
    Realtime,
    /// Post yesterday's transaction digest (8am ET guard)
    Daily,
    /// Post the rolling 7-day rumor digest (Wednesday 8pm ET guard)
    Rumors,
}
