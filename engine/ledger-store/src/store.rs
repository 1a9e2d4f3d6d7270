//! Ledger storage trait, blob codec, and the in-memory backend

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Blob layout shared by every backend: a JSON object with the sorted
/// list of posted transaction ids
#[derive(Debug, Default, Serialize, Deserialize)]
struct LedgerBlob {
    #[serde(default)]
    posted_ids: Vec<String>,
}

/// Encode a posted-id set as the ledger blob
pub fn encode_blob(posted: &BTreeSet<String>) -> Result<String> {
    let blob = LedgerBlob { posted_ids: posted.iter().cloned().collect() };
    Ok(serde_json::to_string_pretty(&blob)?)
}

/// Decode a ledger blob back into the posted-id set
pub fn decode_blob(content: &str) -> Result<BTreeSet<String>> {
    if content.trim().is_empty() {
        return Ok(BTreeSet::new());
    }
    let blob: LedgerBlob = serde_json::from_str(content)?;
    Ok(blob.posted_ids.into_iter().collect())
}

/// Abstract trait for ledger storage backends
#[async_trait::async_trait]
pub trait LedgerStore: Send + Sync {
    /// Load the full set of already-posted transaction ids
    async fn load(&self) -> Result<BTreeSet<String>>;

    /// Persist the full set, replacing the previous blob
    async fn save(&self, posted: &BTreeSet<String>) -> Result<()>;
}

/// In-memory ledger backend (for testing)
#[derive(Debug, Default)]
pub struct MemoryLedger {
    posted: tokio::sync::Mutex<BTreeSet<String>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl LedgerStore for MemoryLedger {
    async fn load(&self) -> Result<BTreeSet<String>> {
        Ok(self.posted.lock().await.clone())
    }

    async fn save(&self, posted: &BTreeSet<String>) -> Result<()> {
        *self.posted.lock().await = posted.clone();
        Ok(())
    }
}
