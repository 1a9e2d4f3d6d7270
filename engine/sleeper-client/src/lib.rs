//! Sleeper API client
//!
//! Typed async access to the Sleeper public endpoints the beat reporter
//! needs: NFL state (current week), league membership, roster ownership,
//! the player catalog, and weekly transactions. The player catalog is
//! large, so a 24-hour on-disk cache sits in front of it.

pub mod catalog;
pub mod client;
pub mod error;
pub mod models;

pub use catalog::CachedPlayerCatalog;
pub use client::{SleeperClient, SLEEPER_API_BASE};
pub use error::{Result, SleeperError};
