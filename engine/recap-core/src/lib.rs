//! Recap Core
//!
//! Pure domain logic for the SFFL beat reporter: resolving roster ids to
//! display names, turning raw league transactions into narrative lines,
//! bucketing activity into New-York-local time windows, and aggregating
//! the weekly rumor digest. No I/O happens in this crate.

pub mod formatter;
pub mod identity;
pub mod models;
pub mod rumor;
pub mod window;

pub use formatter::{clamp_to_cap, Formatter, MAX_POST_CHARS};
pub use identity::{preferred_display_name, IdentityMap, RosterMaps};
pub use models::{
    NarrativeLine, Player, PlayerCatalog, RosterId, Transaction, TransactionKind,
    TransactionStatus,
};
pub use rumor::{weekly_rumors, RumorThresholds};
pub use window::{day_bounds, matches_local_hour, rolling_start, REPORT_TZ};
