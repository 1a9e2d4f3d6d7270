//! Domain models shared across the reporter

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};

/// Roster identifier within a league (matches the numeric Sleeper id)
pub type RosterId = u32;

/// Lifecycle status of a league transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Complete,
    Processed,
    #[serde(other)]
    Other,
}

/// Kind of league transaction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Waiver claim (the provider has used both spellings over the years)
    #[serde(alias = "waivers")]
    Waiver,
    FreeAgent,
    Add,
    Drop,
    Trade,
    #[default]
    #[serde(other)]
    Other,
}

/// A single league transaction as fetched from the provider
///
/// Every optional field may be omitted upstream; decoding must never fail
/// the run over a missing field. `adds`/`drops` map player id to the
/// destination/source roster id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub transaction_id: Option<String>,

    #[serde(rename = "type", default)]
    pub kind: TransactionKind,

    #[serde(default)]
    pub status: Option<TransactionStatus>,

    /// Creation timestamp in epoch milliseconds
    #[serde(default)]
    pub created: i64,

    #[serde(default)]
    pub roster_ids: Vec<RosterId>,

    #[serde(default)]
    pub adds: Option<BTreeMap<String, Option<RosterId>>>,

    #[serde(default)]
    pub drops: Option<BTreeMap<String, Option<RosterId>>>,
}

impl Transaction {
    /// Stable identity of this transaction across repeated polls
    ///
    /// Uses the provider id when present, otherwise a content hash of the
    /// canonical serialization. A synthesized id is only as stable as the
    /// upstream field contents between polls; a trivially changed field
    /// yields a different id and can cause a duplicate post.
    pub fn identity(&self) -> String {
        match &self.transaction_id {
            Some(id) if !id.is_empty() => id.clone(),
            _ => self.content_hash(),
        }
    }

    fn content_hash(&self) -> String {
        // BTreeMap fields keep the serialization canonical regardless of
        // upstream key order.
        let canonical = serde_json::to_string(self).unwrap_or_default();
        let digest = Sha256::digest(canonical.as_bytes());
        digest.iter().take(8).map(|b| format!("{b:02x}")).collect()
    }

    /// Whether the status allows publishing (absent status is acceptable)
    pub fn is_settled(&self) -> bool {
        matches!(
            self.status,
            None | Some(TransactionStatus::Complete) | Some(TransactionStatus::Processed)
        )
    }
}

/// Reference data for one player from the provider catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Player {
    #[serde(default)]
    pub full_name: Option<String>,

    #[serde(default)]
    pub position: Option<String>,

    #[serde(default)]
    pub fantasy_positions: Option<Vec<String>>,
}

/// Player catalog keyed by player id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerCatalog(pub HashMap<String, Player>);

impl PlayerCatalog {
    /// Display name for a player id, falling back to the raw id
    pub fn name_of(&self, player_id: &str) -> String {
        self.0
            .get(player_id)
            .and_then(|p| p.full_name.clone())
            .unwrap_or_else(|| player_id.to_string())
    }

    /// Primary position for a player id, `"?"` when unknown
    pub fn position_of(&self, player_id: &str) -> String {
        self.0
            .get(player_id)
            .and_then(|p| {
                p.position
                    .clone()
                    .or_else(|| p.fantasy_positions.as_ref().and_then(|fp| fp.first().cloned()))
            })
            .unwrap_or_else(|| "?".to_string())
    }
}

/// One formatted, publish-ready sentence describing a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativeLine {
    pub transaction_id: String,
    pub text: String,
    /// Source transaction timestamp in epoch milliseconds
    pub created: i64,
}
