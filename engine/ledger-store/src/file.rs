//! Local file ledger backend

use crate::error::Result;
use crate::store::{decode_blob, encode_blob, LedgerStore};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::debug;

/// Ledger persisted as a JSON file under the data directory
#[derive(Debug)]
pub struct FileLedger {
    path: PathBuf,
}

impl FileLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl LedgerStore for FileLedger {
    async fn load(&self) -> Result<BTreeSet<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => decode_blob(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // First run: nothing posted yet
                debug!("No ledger file at {:?}, starting empty", self.path);
                Ok(BTreeSet::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, posted: &BTreeSet<String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, encode_blob(posted)?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = FileLedger::new(dir.path().join("posted_ids.json"));
        assert!(ledger.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = FileLedger::new(dir.path().join("state/posted_ids.json"));

        let posted: BTreeSet<String> = ["t2", "t1"].into_iter().map(String::from).collect();
        ledger.save(&posted).await.unwrap();
        assert_eq!(ledger.load().await.unwrap(), posted);
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posted_ids.json");
        tokio::fs::write(&path, "garbage").await.unwrap();

        let ledger = FileLedger::new(&path);
        assert!(ledger.load().await.is_err());
    }
}
