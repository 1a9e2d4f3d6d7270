//! Dedup ledger storage
//!
//! The ledger is the only cross-run state in the reporter: the set of
//! transaction ids that have already been published. This crate provides
//! the storage abstraction and three backends: a GitHub Gist blob (the
//! deployed configuration), a local JSON file, and an in-memory store for
//! tests. Read once at the start of a run, written once at the end; no
//! incremental writes.

pub mod error;
pub mod file;
pub mod gist;
pub mod store;

pub use error::{LedgerError, Result};
pub use file::FileLedger;
pub use gist::GistLedger;
pub use store::{LedgerStore, MemoryLedger};
