//! GitHub Gist ledger backend
//!
//! The deployed configuration: the posted-id blob lives in a private gist
//! as `state.json`. Read-modify-write with no optimistic-concurrency
//! check; safe only because the scheduler never runs two invocations at
//! once.

use crate::error::{LedgerError, Result};
use crate::store::{decode_blob, encode_blob, LedgerStore};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::time::Duration;
use tracing::{info, warn};

/// Base URL for the GitHub REST API
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// File name inside the gist that holds the ledger blob
pub const LEDGER_FILE_NAME: &str = "state.json";

const USER_AGENT: &str = "sffl-beat-reporter";

#[derive(Debug, Deserialize)]
struct GistResponse {
    id: String,

    #[serde(default)]
    files: HashMap<String, GistFile>,
}

#[derive(Debug, Default, Deserialize)]
struct GistFile {
    #[serde(default)]
    content: Option<String>,
}

/// Ledger persisted in a GitHub Gist
#[derive(Debug)]
pub struct GistLedger {
    base_url: String,
    client: reqwest::Client,
    token: String,
    /// Filled in after a create when no gist id was configured
    gist_id: tokio::sync::Mutex<Option<String>>,
}

impl GistLedger {
    pub fn new(token: impl Into<String>, gist_id: Option<String>) -> Result<Self> {
        Self::with_base_url(GITHUB_API_BASE, token, gist_id)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        token: impl Into<String>,
        gist_id: Option<String>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(Duration::from_secs(20)).build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
            token: token.into(),
            gist_id: tokio::sync::Mutex::new(gist_id),
        })
    }

    fn payload(posted: &BTreeSet<String>) -> Result<serde_json::Value> {
        Ok(serde_json::json!({
            "files": { LEDGER_FILE_NAME: { "content": encode_blob(posted)? } }
        }))
    }

    async fn create_gist(&self, posted: &BTreeSet<String>) -> Result<String> {
        let mut body = Self::payload(posted)?;
        body["description"] = serde_json::json!("SFFL Beat Reporter state");
        body["public"] = serde_json::json!(false);

        let response = self
            .client
            .post(format!("{}/gists", self.base_url))
            .header("Authorization", format!("token {}", self.token))
            .header("User-Agent", USER_AGENT)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LedgerError::backend(format!(
                "gist create failed with status {}",
                response.status()
            )));
        }
        let gist: GistResponse = response.json().await?;
        Ok(gist.id)
    }
}

#[async_trait::async_trait]
impl LedgerStore for GistLedger {
    async fn load(&self) -> Result<BTreeSet<String>> {
        let Some(gist_id) = self.gist_id.lock().await.clone() else {
            // No gist yet: first run against this configuration
            warn!("No gist id configured, treating every transaction as unseen");
            return Ok(BTreeSet::new());
        };

        let response = self
            .client
            .get(format!("{}/gists/{gist_id}", self.base_url))
            .header("Authorization", format!("token {}", self.token))
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LedgerError::backend(format!(
                "gist fetch failed with status {}",
                response.status()
            )));
        }

        let gist: GistResponse = response.json().await?;
        let content = gist
            .files
            .get(LEDGER_FILE_NAME)
            .and_then(|f| f.content.as_deref())
            .unwrap_or_default();
        decode_blob(content)
    }

    async fn save(&self, posted: &BTreeSet<String>) -> Result<()> {
        let existing = self.gist_id.lock().await.clone();

        match existing {
            Some(gist_id) => {
                let response = self
                    .client
                    .patch(format!("{}/gists/{gist_id}", self.base_url))
                    .header("Authorization", format!("token {}", self.token))
                    .header("User-Agent", USER_AGENT)
                    .json(&Self::payload(posted)?)
                    .send()
                    .await?;

                if !response.status().is_success() {
                    return Err(LedgerError::backend(format!(
                        "gist update failed with status {}",
                        response.status()
                    )));
                }
            }
            None => {
                let new_id = self.create_gist(posted).await?;
                info!("Created ledger gist {new_id}; set GH_GIST_ID to reuse it");
                *self.gist_id.lock().await = Some(new_id);
            }
        }
        Ok(())
    }
}
