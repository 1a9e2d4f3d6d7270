//! Roster-to-display-name resolution

use crate::models::RosterId;
use std::collections::HashMap;

/// League user id to display name, built once per run
pub type IdentityMap = HashMap<String, String>;

/// Run-scoped roster ownership and team-name overrides
#[derive(Debug, Clone, Default)]
pub struct RosterMaps {
    pub owner_by_roster: HashMap<RosterId, String>,
    pub team_name_overrides: HashMap<RosterId, String>,
}

impl RosterMaps {
    /// Resolve a roster id to a display name
    ///
    /// Precedence: explicit roster team-name override, then the owner's
    /// entry in the identity map, then a synthesized placeholder. Total:
    /// resolution always succeeds.
    pub fn team_name(&self, roster_id: RosterId, identities: &IdentityMap) -> String {
        if let Some(name) = self.team_name_overrides.get(&roster_id) {
            return name.clone();
        }
        if let Some(owner_id) = self.owner_by_roster.get(&roster_id) {
            if let Some(name) = identities.get(owner_id) {
                return name.clone();
            }
        }
        format!("Team {roster_id}")
    }
}

/// Pick the display name for a league user
///
/// Precedence: team-name override, display name, handle, raw user id.
/// Empty strings are treated as absent.
pub fn preferred_display_name(
    team_name: Option<&str>,
    display_name: Option<&str>,
    username: Option<&str>,
    user_id: &str,
) -> String {
    [team_name, display_name, username]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .unwrap_or(user_id)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maps() -> (RosterMaps, IdentityMap) {
        let mut rosters = RosterMaps::default();
        rosters.owner_by_roster.insert(1, "u1".to_string());
        rosters.owner_by_roster.insert(2, "u2".to_string());
        rosters.team_name_overrides.insert(2, "The Juggernauts".to_string());

        let mut identities = IdentityMap::new();
        identities.insert("u1".to_string(), "Alice".to_string());
        (rosters, identities)
    }

    #[test]
    fn override_wins_over_identity_map() {
        let (rosters, identities) = maps();
        assert_eq!(rosters.team_name(2, &identities), "The Juggernauts");
    }

    #[test]
    fn falls_back_to_owner_display_name() {
        let (rosters, identities) = maps();
        assert_eq!(rosters.team_name(1, &identities), "Alice");
    }

    #[test]
    fn unknown_roster_gets_placeholder() {
        let (rosters, identities) = maps();
        assert_eq!(rosters.team_name(7, &identities), "Team 7");
    }

    #[test]
    fn display_name_precedence() {
        assert_eq!(
            preferred_display_name(Some("Team X"), Some("disp"), Some("handle"), "42"),
            "Team X"
        );
        assert_eq!(preferred_display_name(None, Some("disp"), Some("handle"), "42"), "disp");
        assert_eq!(preferred_display_name(None, None, Some("handle"), "42"), "handle");
        assert_eq!(preferred_display_name(None, None, None, "42"), "42");
    }

    #[test]
    fn empty_strings_are_skipped() {
        assert_eq!(preferred_display_name(Some(""), Some("disp"), None, "42"), "disp");
        assert_eq!(preferred_display_name(Some(""), Some(""), Some(""), "42"), "42");
    }
}
