//! Weekly rumor-mill aggregation
//!
//! Counts roster churn by position and trade activity per team over an
//! open rolling window, then turns the counts that clear the thresholds
//! into insight lines.

use crate::identity::{IdentityMap, RosterMaps};
use crate::models::{PlayerCatalog, RosterId, Transaction, TransactionKind};
use std::collections::BTreeMap;

/// Minimum activity levels before a rumor line is emitted
#[derive(Debug, Clone, Copy)]
pub struct RumorThresholds {
    /// Adds at one position before "kicked the tires"
    pub adds: u32,
    /// Drops at one position before "churning depth"
    pub drops: u32,
    /// Completed trades before "front office buzz"
    pub trades: u32,
}

impl Default for RumorThresholds {
    fn default() -> Self {
        Self { adds: 3, drops: 3, trades: 1 }
    }
}

/// Aggregate rumor lines for transactions created at or after `start_ms`
///
/// Output ordering is deterministic: add insights, then drop insights,
/// then trade insights, each sorted by (roster id, position). A quiet
/// window yields one closing line.
pub fn weekly_rumors(
    transactions: &[Transaction],
    players: &PlayerCatalog,
    identities: &IdentityMap,
    rosters: &RosterMaps,
    start_ms: i64,
    thresholds: RumorThresholds,
) -> Vec<String> {
    let mut adds_by_pos: BTreeMap<(RosterId, String), u32> = BTreeMap::new();
    let mut drops_by_pos: BTreeMap<(RosterId, String), u32> = BTreeMap::new();
    let mut trades_by_team: BTreeMap<RosterId, u32> = BTreeMap::new();

    for txn in transactions {
        if txn.created < start_ms || !txn.is_settled() {
            continue;
        }
        let Some(&acting) = txn.roster_ids.first() else {
            continue;
        };

        let counts_adds = matches!(
            txn.kind,
            TransactionKind::Waiver | TransactionKind::FreeAgent | TransactionKind::Add
        );
        let counts_drops = matches!(
            txn.kind,
            TransactionKind::Waiver | TransactionKind::FreeAgent | TransactionKind::Drop
        );

        if counts_adds {
            for player_id in txn.adds.iter().flat_map(|m| m.keys()) {
                *adds_by_pos.entry((acting, players.position_of(player_id))).or_default() += 1;
            }
        }
        if counts_drops {
            for player_id in txn.drops.iter().flat_map(|m| m.keys()) {
                *drops_by_pos.entry((acting, players.position_of(player_id))).or_default() += 1;
            }
        }
        if txn.kind == TransactionKind::Trade {
            *trades_by_team.entry(acting).or_default() += 1;
            if let Some(&partner) = txn.roster_ids.get(1) {
                *trades_by_team.entry(partner).or_default() += 1;
            }
        }
    }

    let mut lines = Vec::new();
    for (&(roster_id, ref position), &count) in &adds_by_pos {
        if count >= thresholds.adds {
            let team = rosters.team_name(roster_id, identities);
            lines.push(format!(
                "Sources: {team} kicked the tires on {position} ({count} adds). Market watch."
            ));
        }
    }
    for (&(roster_id, ref position), &count) in &drops_by_pos {
        if count >= thresholds.drops {
            let team = rosters.team_name(roster_id, identities);
            lines.push(format!(
                "Whispers: {team} churning depth at {position} ({count} drops)."
            ));
        }
    }
    for (&roster_id, &count) in &trades_by_team {
        if count >= thresholds.trades {
            let team = rosters.team_name(roster_id, identities);
            lines.push(format!(
                "Front office buzz: {team} completed {count} trade(s). More calls likely."
            ));
        }
    }

    if lines.is_empty() {
        lines.push("Quiet week. GMs playing it close to the vest.".to_string());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Player, TransactionStatus};
    use std::collections::HashMap;

    fn catalog() -> PlayerCatalog {
        let mut players = HashMap::new();
        for (pid, pos) in [("1", "RB"), ("2", "RB"), ("3", "RB"), ("4", "WR")] {
            players.insert(
                pid.to_string(),
                Player { position: Some(pos.to_string()), ..Player::default() },
            );
        }
        PlayerCatalog(players)
    }

    fn setup() -> (IdentityMap, RosterMaps) {
        let mut identities = IdentityMap::new();
        identities.insert("u1".to_string(), "Gridiron Geeks".to_string());
        let mut rosters = RosterMaps::default();
        rosters.owner_by_roster.insert(1, "u1".to_string());
        (identities, rosters)
    }

    fn add_txn(roster: RosterId, player_id: &str, created: i64) -> Transaction {
        Transaction {
            kind: TransactionKind::FreeAgent,
            status: Some(TransactionStatus::Complete),
            created,
            roster_ids: vec![roster],
            adds: Some([(player_id.to_string(), Some(roster))].into_iter().collect()),
            ..Transaction::default()
        }
    }

    #[test]
    fn three_adds_at_one_position_trigger_a_rumor() {
        let players = catalog();
        let (identities, rosters) = setup();
        let txns =
            vec![add_txn(1, "1", 100), add_txn(1, "2", 100), add_txn(1, "3", 100)];

        let lines =
            weekly_rumors(&txns, &players, &identities, &rosters, 0, RumorThresholds::default());
        assert_eq!(
            lines,
            vec!["Sources: Gridiron Geeks kicked the tires on RB (3 adds). Market watch."]
        );
    }

    #[test]
    fn adds_below_threshold_stay_quiet() {
        let players = catalog();
        let (identities, rosters) = setup();
        let txns = vec![add_txn(1, "1", 100), add_txn(1, "4", 100)];

        let lines =
            weekly_rumors(&txns, &players, &identities, &rosters, 0, RumorThresholds::default());
        assert_eq!(lines, vec!["Quiet week. GMs playing it close to the vest."]);
    }

    #[test]
    fn transactions_before_window_start_are_ignored() {
        let players = catalog();
        let (identities, rosters) = setup();
        let txns =
            vec![add_txn(1, "1", 50), add_txn(1, "2", 50), add_txn(1, "3", 100)];

        let lines =
            weekly_rumors(&txns, &players, &identities, &rosters, 60, RumorThresholds::default());
        assert_eq!(lines, vec!["Quiet week. GMs playing it close to the vest."]);
    }

    #[test]
    fn trade_counts_both_participants() {
        let players = catalog();
        let (identities, rosters) = setup();
        let txns = vec![Transaction {
            kind: TransactionKind::Trade,
            status: Some(TransactionStatus::Complete),
            created: 100,
            roster_ids: vec![1, 2],
            ..Transaction::default()
        }];

        let lines =
            weekly_rumors(&txns, &players, &identities, &rosters, 0, RumorThresholds::default());
        assert_eq!(
            lines,
            vec![
                "Front office buzz: Gridiron Geeks completed 1 trade(s). More calls likely.",
                "Front office buzz: Team 2 completed 1 trade(s). More calls likely.",
            ]
        );
    }
}
