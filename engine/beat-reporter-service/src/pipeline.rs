//! The mode-parameterized recap pipeline
//!
//! One pipeline replaces the original pile of near-duplicate scripts:
//! every mode fetches the same reference data and formats transactions
//! the same way; modes differ only in the scheduling guard, the filter
//! (ledger vs. time window vs. rumor aggregation), and the header line.

use crate::config::ReporterConfig;
use crate::publisher::{BlueskySink, DryRunSink, Publisher};
use anyhow::{Context, Result};
use chrono::{Utc, Weekday};
use ledger_store::{FileLedger, GistLedger, LedgerStore};
use recap_core::{
    day_bounds, matches_local_hour, rolling_start, weekly_rumors, Formatter, IdentityMap,
    NarrativeLine, PlayerCatalog, RosterMaps, RumorThresholds, Transaction,
};
use sleeper_client::{CachedPlayerCatalog, SleeperClient};
use std::collections::BTreeSet;
use tracing::{info, warn};

/// What kind of recap this invocation produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Post every not-yet-published transaction once
    Realtime,
    /// Yesterday's digest
    DailyDigest,
    /// Rolling 7-day rumor digest
    WeeklyRumors,
}

impl RunMode {
    /// Local-hour scheduling guard for this mode, if any
    fn guard(self) -> Option<(u32, Option<Weekday>)> {
        match self {
            RunMode::Realtime => None,
            RunMode::DailyDigest => Some((8, None)),
            RunMode::WeeklyRumors => Some((20, Some(Weekday::Wed))),
        }
    }
}

/// Reference data fetched once per run
struct LeagueData {
    identities: IdentityMap,
    rosters: RosterMaps,
    players: PlayerCatalog,
    transactions: Vec<Transaction>,
}

/// The recap pipeline: fetch, format, filter, publish, persist
pub struct Pipeline {
    config: ReporterConfig,
    sleeper: SleeperClient,
    ledger: Box<dyn LedgerStore>,
    publisher: Publisher,
}

impl Pipeline {
    pub fn new(config: ReporterConfig) -> Result<Self> {
        let sleeper = SleeperClient::new().context("Failed to create Sleeper client")?;

        let ledger: Box<dyn LedgerStore> = match &config.ledger.github_token {
            Some(token) => Box::new(
                GistLedger::new(token.clone(), config.ledger.gist_id.clone())
                    .context("Failed to create gist ledger")?,
            ),
            None => Box::new(FileLedger::new(&config.ledger.file_path)),
        };

        let publisher = if config.dry_run {
            Publisher::new(Box::new(DryRunSink))
        } else {
            let handle = config.bluesky.handle.clone().unwrap_or_default();
            let password = config.bluesky.app_password.clone().unwrap_or_default();
            Publisher::new(Box::new(BlueskySink::new(
                config.bluesky.service_url.clone(),
                handle,
                password,
            )?))
        };

        Ok(Self { config, sleeper, ledger, publisher })
    }

    /// Run one invocation of the given mode
    ///
    /// "Nothing to post" is a silent success. `force` skips the
    /// local-hour guard.
    pub async fn run(&self, mode: RunMode, force: bool) -> Result<()> {
        if !force {
            if let Some((hour, weekday)) = mode.guard() {
                if !matches_local_hour(Utc::now(), hour, weekday) {
                    info!("Skipping {mode:?}: outside the scheduled local hour");
                    return Ok(());
                }
            }
        }

        let data = self.fetch_league_data().await?;
        let formatter = Formatter::new(&data.players, &data.identities, &data.rosters);

        match mode {
            RunMode::Realtime => self.run_realtime(&formatter, &data).await,
            RunMode::DailyDigest => self.run_daily(&formatter, &data).await,
            RunMode::WeeklyRumors => self.run_rumors(&data).await,
        }
    }

    /// Fetch all reference data for the run; any failure here is fatal
    /// (no partial posting from incomplete data)
    async fn fetch_league_data(&self) -> Result<LeagueData> {
        let league_id = &self.config.league_id;

        let week = match self.config.validated_week_override() {
            Some(week) => week,
            None => self
                .sleeper
                .current_week()
                .await
                .context("Failed to fetch current NFL week")?,
        };
        info!("Running against league {league_id}, week {week}");

        let identities = self
            .sleeper
            .league_users(league_id)
            .await
            .context("Failed to fetch league users")?;
        let rosters = self
            .sleeper
            .league_rosters(league_id)
            .await
            .context("Failed to fetch league rosters")?;
        let players = CachedPlayerCatalog::new(&self.config.player_cache_path)
            .load(&self.sleeper)
            .await
            .context("Failed to load player catalog")?;
        let transactions = self
            .sleeper
            .transactions(league_id, week)
            .await
            .context("Failed to fetch transactions")?;

        Ok(LeagueData { identities, rosters, players, transactions })
    }

    async fn run_realtime(&self, formatter: &Formatter<'_>, data: &LeagueData) -> Result<()> {
        let lines = formatter.format_all(&data.transactions);

        let mut seen = match self.ledger.load().await {
            Ok(seen) => seen,
            Err(e) => {
                warn!("Ledger load failed, treating every transaction as unseen: {e}");
                BTreeSet::new()
            }
        };

        let new_lines = select_new_lines(lines, &seen);
        if new_lines.is_empty() {
            info!("No new transactions.");
            return Ok(());
        }

        let texts: Vec<String> = new_lines.iter().map(|l| l.text.clone()).collect();
        let posted = self.publisher.publish(&texts).await;

        // Attempted posts count as published: the ledger and the posting
        // API are not transactional, and a duplicate skip beats a
        // double post.
        for line in &new_lines {
            seen.insert(line.transaction_id.clone());
        }
        if let Err(e) = self.ledger.save(&seen).await {
            warn!("Ledger save failed; already-sent posts stand: {e}");
        }

        info!("Posted {posted} of {} update(s)", new_lines.len());
        Ok(())
    }

    async fn run_daily(&self, formatter: &Formatter<'_>, data: &LeagueData) -> Result<()> {
        let (start_ms, end_ms) = day_bounds(Utc::now(), 1);
        let lines = lines_in_window(formatter.format_all(&data.transactions), start_ms, end_ms);

        if lines.is_empty() {
            info!("No transactions yesterday.");
            return Ok(());
        }

        let mut posts = vec!["Daily SFFL Transaction Recap (yesterday):".to_string()];
        posts.extend(lines.into_iter().map(|l| l.text));
        let posted = self.publisher.publish(&posts).await;

        info!("Posted daily digest with {} item(s)", posted.saturating_sub(1));
        Ok(())
    }

    async fn run_rumors(&self, data: &LeagueData) -> Result<()> {
        let start_ms = rolling_start(Utc::now(), 7);
        let insights = weekly_rumors(
            &data.transactions,
            &data.players,
            &data.identities,
            &data.rosters,
            start_ms,
            RumorThresholds::default(),
        );

        let mut posts = vec!["Rumor Central (last 7 days):".to_string()];
        posts.extend(insights);
        let posted = self.publisher.publish(&posts).await;

        info!("Posted weekly rumor note with {} insight line(s)", posted.saturating_sub(1));
        Ok(())
    }
}

/// Keep only lines whose transaction id is not in the ledger, ordered by
/// ascending id for a reproducible narrative sequence
fn select_new_lines(lines: Vec<NarrativeLine>, seen: &BTreeSet<String>) -> Vec<NarrativeLine> {
    let mut new_lines: Vec<NarrativeLine> =
        lines.into_iter().filter(|l| !seen.contains(&l.transaction_id)).collect();
    new_lines.sort_by(|a, b| a.transaction_id.cmp(&b.transaction_id));
    new_lines
}

/// Keep only lines created inside the half-open `[start_ms, end_ms)` window
fn lines_in_window(lines: Vec<NarrativeLine>, start_ms: i64, end_ms: i64) -> Vec<NarrativeLine> {
    lines.into_iter().filter(|l| (start_ms..end_ms).contains(&l.created)).collect()
}
