//! Service configuration management
//!
//! Built exactly once at process start from environment variables, then
//! overridden by CLI flags. Nothing else in the service reads process
//! environment: the dry-run and verbose switches travel inside this
//! struct instead of being consulted ad hoc.

use anyhow::{bail, Result};
use std::path::PathBuf;
use tracing::warn;

/// Main reporter configuration
#[derive(Debug, Clone)]
pub struct ReporterConfig {
    /// Sleeper league identifier (required)
    pub league_id: String,

    /// Bluesky posting credentials
    pub bluesky: BlueskyConfig,

    /// Dedup ledger storage
    pub ledger: LedgerConfig,

    /// Manual week override; out-of-range values fall back to the live
    /// current-week lookup
    pub week_override: Option<u32>,

    /// Validate and print instead of posting
    pub dry_run: bool,

    /// Debug-level logging
    pub verbose: bool,

    /// Player catalog cache file
    pub player_cache_path: PathBuf,
}

/// Bluesky posting credentials and endpoint
#[derive(Debug, Clone)]
pub struct BlueskyConfig {
    pub handle: Option<String>,
    pub app_password: Option<String>,
    pub service_url: String,
}

/// Ledger backend selection: a gist when a GitHub token is configured,
/// otherwise a local file
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    pub github_token: Option<String>,
    pub gist_id: Option<String>,
    pub file_path: PathBuf,
}

/// Weeks the provider can actually serve (regular season plus playoffs)
const WEEK_RANGE: std::ops::RangeInclusive<u32> = 1..=22;

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            league_id: String::new(),
            bluesky: BlueskyConfig {
                handle: None,
                app_password: None,
                service_url: "https://bsky.social".to_string(),
            },
            ledger: LedgerConfig {
                github_token: None,
                gist_id: None,
                file_path: PathBuf::from("./data/posted_ids.json"),
            },
            week_override: None,
            dry_run: false,
            verbose: false,
            player_cache_path: PathBuf::from("./data/players.json"),
        }
    }
}

impl ReporterConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(league_id) = std::env::var("SLEEPER_LEAGUE_ID") {
            config.league_id = league_id;
        }
        if let Ok(handle) = std::env::var("BSKY_HANDLE") {
            config.bluesky.handle = Some(handle);
        }
        if let Ok(password) = std::env::var("BSKY_APP_PASSWORD") {
            config.bluesky.app_password = Some(password);
        }
        if let Ok(url) = std::env::var("BSKY_SERVICE_URL") {
            config.bluesky.service_url = url;
        }
        if let Ok(token) = std::env::var("GH_TOKEN") {
            config.ledger.github_token = Some(token);
        }
        if let Ok(gist_id) = std::env::var("GH_GIST_ID") {
            config.ledger.gist_id = Some(gist_id);
        }
        if let Ok(week) = std::env::var("SFFL_WEEK") {
            match week.parse() {
                Ok(week) => config.week_override = Some(week),
                Err(_) => warn!("Ignoring unparseable SFFL_WEEK value {week:?}"),
            }
        }
        if let Ok(path) = std::env::var("SFFL_LEDGER_FILE") {
            config.ledger.file_path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("SFFL_PLAYER_CACHE") {
            config.player_cache_path = PathBuf::from(path);
        }
        config.dry_run = std::env::var("DRY_RUN").as_deref() == Ok("1");
        config.verbose = std::env::var("DEBUG").as_deref() == Ok("1");

        config
    }

    /// Apply CLI flags on top of the environment (flags win)
    pub fn apply_cli(&mut self, cli: &crate::cli::Cli) {
        if let Some(league_id) = &cli.league_id {
            self.league_id = league_id.clone();
        }
        if let Some(week) = cli.week {
            self.week_override = Some(week);
        }
        if cli.dry_run {
            self.dry_run = true;
        }
        if cli.verbose {
            self.verbose = true;
        }
    }

    /// Validate required settings before any network call
    pub fn validate(&self) -> Result<()> {
        if self.league_id.is_empty() {
            bail!("SLEEPER_LEAGUE_ID (or --league-id) is required");
        }
        if !self.dry_run {
            if self.bluesky.handle.as_deref().unwrap_or_default().is_empty() {
                bail!("BSKY_HANDLE is required unless running with --dry-run");
            }
            if self.bluesky.app_password.as_deref().unwrap_or_default().is_empty() {
                bail!("BSKY_APP_PASSWORD is required unless running with --dry-run");
            }
        }
        Ok(())
    }

    /// Week override if it is usable; out-of-range values are dropped with
    /// a warning so the pipeline falls back to the live lookup
    pub fn validated_week_override(&self) -> Option<u32> {
        match self.week_override {
            Some(week) if WEEK_RANGE.contains(&week) => Some(week),
            Some(week) => {
                warn!("Ignoring out-of-range week override {week}; using live NFL state");
                None
            }
            None => None,
        }
    }
}
