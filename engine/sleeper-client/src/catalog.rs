//! On-disk player-catalog cache
//!
//! The `/players/nfl` endpoint ships the whole NFL catalog, so it is
//! fetched at most once per staleness window and kept as a JSON file.

use crate::client::SleeperClient;
use crate::error::Result;
use recap_core::PlayerCatalog;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, info, warn};

/// How long a cached catalog stays usable
pub const PLAYER_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// File-backed cache in front of [`SleeperClient::players`]
#[derive(Debug)]
pub struct CachedPlayerCatalog {
    path: PathBuf,
    ttl: Duration,
}

impl CachedPlayerCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), ttl: PLAYER_CACHE_TTL }
    }

    /// Override the staleness bound (used by tests)
    pub fn with_ttl(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self { path: path.into(), ttl }
    }

    /// Load the catalog, refetching when the cache is missing or stale
    ///
    /// A cache read failure falls back to the network; a cache write
    /// failure is logged and the fresh catalog is still returned.
    pub async fn load(&self, client: &SleeperClient) -> Result<PlayerCatalog> {
        if let Some(catalog) = self.read_fresh().await {
            debug!("Using cached player catalog at {:?}", self.path);
            return Ok(catalog);
        }

        let catalog = client.players().await?;
        if let Err(e) = self.write(&catalog).await {
            warn!("Failed to write player cache at {:?}: {e}", self.path);
        } else {
            info!("Refreshed player cache at {:?}", self.path);
        }
        Ok(catalog)
    }

    /// Whether the cache file exists and is within the staleness bound
    pub fn is_fresh(&self) -> bool {
        cache_age(&self.path).is_some_and(|age| age <= self.ttl)
    }

    async fn read_fresh(&self) -> Option<PlayerCatalog> {
        if !self.is_fresh() {
            return None;
        }
        let text = tokio::fs::read_to_string(&self.path).await.ok()?;
        match serde_json::from_str(&text) {
            Ok(catalog) => Some(catalog),
            Err(e) => {
                warn!("Player cache at {:?} is unreadable, refetching: {e}", self.path);
                None
            }
        }
    }

    async fn write(&self, catalog: &PlayerCatalog) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let text = serde_json::to_string(catalog)?;
        tokio::fs::write(&self.path, text).await?;
        Ok(())
    }
}

fn cache_age(path: &Path) -> Option<Duration> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    SystemTime::now().duration_since(modified).ok()
}
