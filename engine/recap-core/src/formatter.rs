//! Transaction-to-narrative formatting

use crate::identity::{IdentityMap, RosterMaps};
use crate::models::{
    NarrativeLine, PlayerCatalog, RosterId, Transaction, TransactionKind,
};
use std::collections::BTreeMap;

/// Hard length cap for a single post
///
/// 300 characters, the Bluesky limit. The original deployment wavered
/// between 280 and 300; 300 is used consistently everywhere.
pub const MAX_POST_CHARS: usize = 300;

/// Truncate text to the post length cap (plain character cut, no
/// word-boundary trimming)
pub fn clamp_to_cap(text: String) -> String {
    if text.chars().count() <= MAX_POST_CHARS {
        text
    } else {
        text.chars().take(MAX_POST_CHARS).collect()
    }
}

/// Formats raw transactions into narrative lines against the run-scoped
/// reference data
pub struct Formatter<'a> {
    players: &'a PlayerCatalog,
    identities: &'a IdentityMap,
    rosters: &'a RosterMaps,
}

impl<'a> Formatter<'a> {
    pub fn new(
        players: &'a PlayerCatalog,
        identities: &'a IdentityMap,
        rosters: &'a RosterMaps,
    ) -> Self {
        Self { players, identities, rosters }
    }

    /// Format every transaction that produces output, preserving input order
    pub fn format_all(&self, transactions: &[Transaction]) -> Vec<NarrativeLine> {
        transactions.iter().filter_map(|t| self.format_one(t)).collect()
    }

    /// Convert one transaction into zero or one narrative line
    ///
    /// Pending/failed transactions, kinds outside the add/drop/trade
    /// families, and moves with nothing to say all legitimately produce
    /// no output.
    pub fn format_one(&self, txn: &Transaction) -> Option<NarrativeLine> {
        if !txn.is_settled() {
            return None;
        }

        let text = match txn.kind {
            TransactionKind::Waiver
            | TransactionKind::FreeAgent
            | TransactionKind::Add
            | TransactionKind::Drop => self.roster_move_text(txn)?,
            TransactionKind::Trade => self.trade_text(txn)?,
            TransactionKind::Other => return None,
        };

        Some(NarrativeLine {
            transaction_id: txn.identity(),
            text: clamp_to_cap(text),
            created: txn.created,
        })
    }

    fn team_name(&self, roster_id: RosterId) -> String {
        self.rosters.team_name(roster_id, self.identities)
    }

    /// Resolve a player-id map to display names, in player-id order
    fn player_names(&self, entries: Option<&BTreeMap<String, Option<RosterId>>>) -> Vec<String> {
        entries
            .map(|m| m.keys().map(|pid| self.players.name_of(pid)).collect())
            .unwrap_or_default()
    }

    fn roster_move_text(&self, txn: &Transaction) -> Option<String> {
        let acting = *txn.roster_ids.first()?;
        let team = self.team_name(acting);

        let add_names = self.player_names(txn.adds.as_ref());
        let drop_names = self.player_names(txn.drops.as_ref());

        match (add_names.is_empty(), drop_names.is_empty()) {
            (false, false) => Some(format!(
                "{team} added {} and dropped {}.",
                add_names.join(", "),
                drop_names.join(", ")
            )),
            (false, true) => Some(format!("{team} added {}.", add_names.join(", "))),
            (true, false) => Some(format!("{team} dropped {}.", drop_names.join(", "))),
            (true, true) => None,
        }
    }

    /// Two-team trade composition
    ///
    /// Only the first two roster ids participate; add entries whose
    /// destination matches neither are silently dropped, so trades with
    /// more than two teams or pick-only legs produce partial or empty
    /// output. Accepted limitation, kept from the original behavior.
    fn trade_text(&self, txn: &Transaction) -> Option<String> {
        if txn.roster_ids.len() < 2 {
            return None;
        }
        let (rid_a, rid_b) = (txn.roster_ids[0], txn.roster_ids[1]);
        let (team_a, team_b) = (self.team_name(rid_a), self.team_name(rid_b));

        let mut a_received = Vec::new();
        let mut b_received = Vec::new();
        if let Some(adds) = &txn.adds {
            for (player_id, destination) in adds {
                let name = self.players.name_of(player_id);
                match destination {
                    Some(rid) if *rid == rid_a => a_received.push(name),
                    Some(rid) if *rid == rid_b => b_received.push(name),
                    other => {
                        tracing::debug!(
                            "Ignoring trade add {player_id} with destination {other:?}"
                        );
                    }
                }
            }
        }

        let mut parts = Vec::new();
        if !a_received.is_empty() {
            parts.push(format!("{team_a} received {} from {team_b}", a_received.join(", ")));
        }
        if !b_received.is_empty() {
            parts.push(format!("{team_b} received {} from {team_a}", b_received.join(", ")));
        }
        if parts.is_empty() {
            return None;
        }
        Some(format!("{}.", parts.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Player, TransactionStatus};
    use std::collections::HashMap;

    fn catalog() -> PlayerCatalog {
        let mut players = HashMap::new();
        players.insert(
            "101".to_string(),
            Player { full_name: Some("John Doe".to_string()), ..Player::default() },
        );
        players.insert(
            "55".to_string(),
            Player { full_name: Some("Rick Moore".to_string()), ..Player::default() },
        );
        players.insert(
            "77".to_string(),
            Player { full_name: Some("Sam Hill".to_string()), ..Player::default() },
        );
        PlayerCatalog(players)
    }

    fn identities() -> IdentityMap {
        let mut m = IdentityMap::new();
        m.insert("u1".to_string(), "Gridiron Geeks".to_string());
        m.insert("u2".to_string(), "End Zone Elite".to_string());
        m
    }

    fn rosters() -> RosterMaps {
        let mut r = RosterMaps::default();
        r.owner_by_roster.insert(1, "u1".to_string());
        r.owner_by_roster.insert(2, "u2".to_string());
        r
    }

    fn adds(entries: &[(&str, Option<RosterId>)]) -> Option<BTreeMap<String, Option<RosterId>>> {
        Some(entries.iter().map(|(pid, rid)| (pid.to_string(), *rid)).collect())
    }

    #[test]
    fn pending_status_produces_nothing() {
        let players = catalog();
        let ids = identities();
        let ros = rosters();
        let formatter = Formatter::new(&players, &ids, &ros);

        let txn = Transaction {
            kind: TransactionKind::FreeAgent,
            status: Some(TransactionStatus::Other),
            roster_ids: vec![1],
            adds: adds(&[("101", Some(1))]),
            ..Transaction::default()
        };
        assert!(formatter.format_one(&txn).is_none());
    }

    #[test]
    fn absent_status_is_accepted() {
        let players = catalog();
        let ids = identities();
        let ros = rosters();
        let formatter = Formatter::new(&players, &ids, &ros);

        let txn = Transaction {
            kind: TransactionKind::Add,
            status: None,
            roster_ids: vec![1],
            adds: adds(&[("101", Some(1))]),
            ..Transaction::default()
        };
        let line = formatter.format_one(&txn).unwrap();
        assert_eq!(line.text, "Gridiron Geeks added John Doe.");
    }

    #[test]
    fn add_and_drop_compose_both_clauses() {
        let players = catalog();
        let ids = identities();
        let ros = rosters();
        let formatter = Formatter::new(&players, &ids, &ros);

        let txn = Transaction {
            kind: TransactionKind::Waiver,
            status: Some(TransactionStatus::Complete),
            roster_ids: vec![2],
            adds: adds(&[("101", Some(2))]),
            drops: adds(&[("55", Some(2))]),
            ..Transaction::default()
        };
        let line = formatter.format_one(&txn).unwrap();
        assert_eq!(line.text, "End Zone Elite added John Doe and dropped Rick Moore.");
    }

    #[test]
    fn drop_only_composes_single_clause() {
        let players = catalog();
        let ids = identities();
        let ros = rosters();
        let formatter = Formatter::new(&players, &ids, &ros);

        let txn = Transaction {
            kind: TransactionKind::Drop,
            status: Some(TransactionStatus::Processed),
            roster_ids: vec![1],
            drops: adds(&[("55", Some(1))]),
            ..Transaction::default()
        };
        let line = formatter.format_one(&txn).unwrap();
        assert_eq!(line.text, "Gridiron Geeks dropped Rick Moore.");
    }

    #[test]
    fn empty_move_produces_nothing() {
        let players = catalog();
        let ids = identities();
        let ros = rosters();
        let formatter = Formatter::new(&players, &ids, &ros);

        let txn = Transaction {
            kind: TransactionKind::FreeAgent,
            status: Some(TransactionStatus::Complete),
            roster_ids: vec![1],
            ..Transaction::default()
        };
        assert!(formatter.format_one(&txn).is_none());
    }

    #[test]
    fn unknown_player_falls_back_to_raw_id() {
        let players = catalog();
        let ids = identities();
        let ros = rosters();
        let formatter = Formatter::new(&players, &ids, &ros);

        let txn = Transaction {
            kind: TransactionKind::Add,
            status: Some(TransactionStatus::Complete),
            roster_ids: vec![1],
            adds: adds(&[("424242", Some(1))]),
            ..Transaction::default()
        };
        let line = formatter.format_one(&txn).unwrap();
        assert_eq!(line.text, "Gridiron Geeks added 424242.");
    }

    #[test]
    fn trade_composes_two_clauses_first_roster_first() {
        let players = catalog();
        let ids = identities();
        let ros = rosters();
        let formatter = Formatter::new(&players, &ids, &ros);

        let txn = Transaction {
            transaction_id: Some("t1".to_string()),
            kind: TransactionKind::Trade,
            status: Some(TransactionStatus::Complete),
            roster_ids: vec![1, 2],
            adds: adds(&[("55", Some(2)), ("77", Some(1))]),
            ..Transaction::default()
        };
        let line = formatter.format_one(&txn).unwrap();
        assert_eq!(
            line.text,
            "Gridiron Geeks received Sam Hill from End Zone Elite; \
             End Zone Elite received Rick Moore from Gridiron Geeks."
        );
    }

    #[test]
    fn trade_with_one_roster_produces_nothing() {
        let players = catalog();
        let ids = identities();
        let ros = rosters();
        let formatter = Formatter::new(&players, &ids, &ros);

        let txn = Transaction {
            kind: TransactionKind::Trade,
            status: Some(TransactionStatus::Complete),
            roster_ids: vec![1],
            adds: adds(&[("55", Some(1))]),
            ..Transaction::default()
        };
        assert!(formatter.format_one(&txn).is_none());
    }

    #[test]
    fn pick_only_trade_produces_nothing() {
        // No player adds at all: pick-only legs are invisible to the
        // formatter. Documented limitation.
        let players = catalog();
        let ids = identities();
        let ros = rosters();
        let formatter = Formatter::new(&players, &ids, &ros);

        let txn = Transaction {
            kind: TransactionKind::Trade,
            status: Some(TransactionStatus::Complete),
            roster_ids: vec![1, 2],
            ..Transaction::default()
        };
        assert!(formatter.format_one(&txn).is_none());
    }

    #[test]
    fn third_party_trade_destination_is_dropped() {
        let players = catalog();
        let ids = identities();
        let ros = rosters();
        let formatter = Formatter::new(&players, &ids, &ros);

        let txn = Transaction {
            kind: TransactionKind::Trade,
            status: Some(TransactionStatus::Complete),
            roster_ids: vec![1, 2, 3],
            adds: adds(&[("55", Some(3)), ("77", Some(1))]),
            ..Transaction::default()
        };
        let line = formatter.format_one(&txn).unwrap();
        assert_eq!(line.text, "Gridiron Geeks received Sam Hill from End Zone Elite.");
    }

    #[test]
    fn long_text_is_truncated_to_cap() {
        let long: String = "x".repeat(MAX_POST_CHARS * 2);
        let clamped = clamp_to_cap(long);
        assert_eq!(clamped.chars().count(), MAX_POST_CHARS);
    }

    #[test]
    fn cap_respects_char_boundaries() {
        let long: String = "é".repeat(MAX_POST_CHARS + 10);
        let clamped = clamp_to_cap(long);
        assert_eq!(clamped.chars().count(), MAX_POST_CHARS);
    }
}
