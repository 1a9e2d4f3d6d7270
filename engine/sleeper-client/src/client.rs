//! Sleeper API client

use crate::error::{Result, SleeperError};
use crate::models::{LeagueRoster, LeagueUser, NflState};
use recap_core::{preferred_display_name, IdentityMap, PlayerCatalog, RosterMaps, Transaction};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

/// Base URL for the Sleeper public API
pub const SLEEPER_API_BASE: &str = "https://api.sleeper.app/v1";

/// The player catalog endpoint ships several megabytes; give it more room
const PLAYERS_TIMEOUT: Duration = Duration::from_secs(60);

/// Sleeper API client
#[derive(Debug)]
pub struct SleeperClient {
    base_url: String,
    client: reqwest::Client,
}

impl SleeperClient {
    /// Create a client against the public API
    pub fn new() -> Result<Self> {
        Self::with_base_url(SLEEPER_API_BASE)
    }

    /// Create a client against a custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self { base_url: base_url.into(), client })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_json_with_timeout(path, None).await
    }

    async fn get_json_with_timeout<T: DeserializeOwned>(
        &self,
        path: &str,
        timeout: Option<Duration>,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {url}");

        let mut request = self.client.get(&url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(SleeperError::api(format!(
                "GET {path} failed with status {}",
                response.status()
            )));
        }
        Ok(response.json().await?)
    }

    /// Current NFL week from `/state/nfl`
    pub async fn current_week(&self) -> Result<u32> {
        let state: NflState = self.get_json("/state/nfl").await?;
        Ok(state.week)
    }

    /// League membership as an identity map (user id to display name)
    pub async fn league_users(&self, league_id: &str) -> Result<IdentityMap> {
        let rows: Vec<LeagueUser> = self.get_json(&format!("/league/{league_id}/users")).await?;
        info!("Fetched {} league users", rows.len());

        Ok(rows
            .into_iter()
            .map(|user| {
                let name = preferred_display_name(
                    user.metadata.as_ref().and_then(|m| m.team_name.as_deref()),
                    user.display_name.as_deref(),
                    user.username.as_deref(),
                    &user.user_id,
                );
                (user.user_id, name)
            })
            .collect())
    }

    /// Roster ownership and team-name overrides for a league
    pub async fn league_rosters(&self, league_id: &str) -> Result<RosterMaps> {
        let rows: Vec<LeagueRoster> =
            self.get_json(&format!("/league/{league_id}/rosters")).await?;
        info!("Fetched {} rosters", rows.len());

        let mut maps = RosterMaps::default();
        for roster in rows {
            if let Some(owner_id) = roster.owner_id {
                maps.owner_by_roster.insert(roster.roster_id, owner_id);
            }
            if let Some(team_name) = roster.metadata.and_then(|m| m.team_name) {
                if !team_name.is_empty() {
                    maps.team_name_overrides.insert(roster.roster_id, team_name);
                }
            }
        }
        Ok(maps)
    }

    /// Full NFL player catalog (large; prefer [`crate::CachedPlayerCatalog`])
    pub async fn players(&self) -> Result<PlayerCatalog> {
        let catalog: PlayerCatalog =
            self.get_json_with_timeout("/players/nfl", Some(PLAYERS_TIMEOUT)).await?;
        info!("Fetched player catalog with {} entries", catalog.0.len());
        Ok(catalog)
    }

    /// Transactions for a league week
    ///
    /// The endpoint returns a JSON `null` when the week has no activity.
    pub async fn transactions(&self, league_id: &str, week: u32) -> Result<Vec<Transaction>> {
        let body: serde_json::Value =
            self.get_json(&format!("/league/{league_id}/transactions/{week}")).await?;

        let transactions = match body {
            serde_json::Value::Null => Vec::new(),
            value => serde_json::from_value(value)?,
        };
        info!("Fetched {} transactions for week {week}", transactions.len());
        Ok(transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recap_core::{TransactionKind, TransactionStatus};

    #[test]
    fn transaction_rows_decode_from_api_shape() {
        let body = r#"[
            {
                "transaction_id": "1112223334445556667",
                "type": "waiver",
                "status": "complete",
                "created": 1726000000000,
                "roster_ids": [4],
                "adds": {"8136": 4},
                "drops": null
            },
            {
                "type": "commissioner",
                "status": "failed"
            }
        ]"#;
        let txns: Vec<Transaction> = serde_json::from_str(body).unwrap();

        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].kind, TransactionKind::Waiver);
        assert_eq!(txns[0].status, Some(TransactionStatus::Complete));
        assert_eq!(txns[0].adds.as_ref().unwrap().get("8136"), Some(&Some(4)));
        assert!(txns[0].drops.is_none());

        assert_eq!(txns[1].kind, TransactionKind::Other);
        assert_eq!(txns[1].status, Some(TransactionStatus::Other));
    }

    #[test]
    fn null_transaction_body_means_empty_week() {
        let body: serde_json::Value = serde_json::from_str("null").unwrap();
        let txns = match body {
            serde_json::Value::Null => Vec::new(),
            value => serde_json::from_value::<Vec<Transaction>>(value).unwrap(),
        };
        assert!(txns.is_empty());
    }
}
