//! Wire models for the Sleeper API responses
//!
//! Everything optional the provider may omit is an `Option` with a serde
//! default; decoding a sparse row must never fail the run.

use serde::Deserialize;

/// League membership row (`/league/{id}/users`)
#[derive(Debug, Clone, Deserialize)]
pub struct LeagueUser {
    pub user_id: String,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub metadata: Option<UserMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserMetadata {
    /// Custom team name set by the user, wins over the display name
    #[serde(default)]
    pub team_name: Option<String>,
}

/// Roster ownership row (`/league/{id}/rosters`)
#[derive(Debug, Clone, Deserialize)]
pub struct LeagueRoster {
    pub roster_id: u32,

    #[serde(default)]
    pub owner_id: Option<String>,

    #[serde(default)]
    pub metadata: Option<RosterMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RosterMetadata {
    #[serde(default)]
    pub team_name: Option<String>,
}

/// NFL state response (`/state/nfl`)
#[derive(Debug, Clone, Deserialize)]
pub struct NflState {
    #[serde(default)]
    pub week: u32,

    #[serde(default)]
    pub season: Option<String>,

    #[serde(default)]
    pub season_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_user_row_decodes() {
        let user: LeagueUser = serde_json::from_str(r#"{"user_id": "42"}"#).unwrap();
        assert_eq!(user.user_id, "42");
        assert!(user.display_name.is_none());
        assert!(user.metadata.is_none());
    }

    #[test]
    fn user_metadata_team_name_decodes() {
        let user: LeagueUser = serde_json::from_str(
            r#"{"user_id": "42", "display_name": "dp", "metadata": {"team_name": "The Juggernauts", "avatar": "x"}}"#,
        )
        .unwrap();
        assert_eq!(user.metadata.unwrap().team_name.as_deref(), Some("The Juggernauts"));
    }

    #[test]
    fn orphaned_roster_decodes_without_owner() {
        let roster: LeagueRoster = serde_json::from_str(r#"{"roster_id": 3}"#).unwrap();
        assert_eq!(roster.roster_id, 3);
        assert!(roster.owner_id.is_none());
    }

    #[test]
    fn nfl_state_defaults_week_to_zero() {
        let state: NflState = serde_json::from_str(r#"{"season": "2025"}"#).unwrap();
        assert_eq!(state.week, 0);
    }
}
