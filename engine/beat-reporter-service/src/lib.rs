//! SFFL Beat Reporter Service
//!
//! The binary that ties the reporter together: load configuration, fetch
//! the week's league data through `sleeper-client`, format it with
//! `recap-core`, filter through the `ledger-store` dedup ledger or a time
//! window depending on the run mode, and publish to Bluesky.

pub mod cli;
pub mod config;
pub mod logging;
pub mod pipeline;
pub mod publisher;

pub use cli::{Cli, Commands};
pub use config::ReporterConfig;
pub use logging::initialize_logging;
pub use pipeline::{Pipeline, RunMode};
pub use publisher::{BlueskySink, DryRunSink, MemorySink, PostSink, Publisher};
