//! Lenient views over the stats API payloads.
//!
//! The cache stores these payloads untouched; they are only decoded when a
//! screen needs to reshape them. Every counter defaults to zero whether the
//! API omits it or sends `null`.

// Allow dead code: API response structs have fields for completeness
#![allow(dead_code)]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

/// Mode id of all battle royale modes combined.
pub const ALL_BR_MODES: &str = "br_all";

/// Response of the recent-matches endpoint.
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchHistory {
    #[serde_as(as = "DefaultOnNull")]
    pub matches: Vec<RawMatch>,
}

/// Response of the match-details endpoint: every participant's line.
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchPlayers {
    #[serde(rename = "allPlayers")]
    #[serde_as(as = "DefaultOnNull")]
    pub all_players: Vec<RawMatch>,
}

#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawMatch {
    #[serde(rename = "matchID")]
    #[serde_as(as = "DefaultOnNull")]
    pub match_id: String,
    #[serde_as(as = "DefaultOnNull")]
    pub mode: String,
    #[serde(rename = "utcStartSeconds")]
    #[serde_as(as = "DefaultOnNull")]
    pub utc_start_seconds: i64,
    #[serde(rename = "utcEndSeconds")]
    #[serde_as(as = "DefaultOnNull")]
    pub utc_end_seconds: i64,
    #[serde(rename = "playerCount")]
    pub player_count: Option<u32>,
    #[serde(rename = "teamCount")]
    pub team_count: Option<u32>,
    #[serde_as(as = "DefaultOnNull")]
    pub player: RawPlayer,
    #[serde(rename = "playerStats")]
    #[serde_as(as = "DefaultOnNull")]
    pub player_stats: RawPlayerStats,
}

#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPlayer {
    #[serde_as(as = "DefaultOnNull")]
    pub uno: String,
    #[serde_as(as = "DefaultOnNull")]
    pub username: String,
    #[serde_as(as = "DefaultOnNull")]
    pub team: String,
}

#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPlayerStats {
    #[serde_as(as = "DefaultOnNull")]
    pub kills: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub deaths: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub assists: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub headshots: f64,
    #[serde(rename = "damageDone")]
    #[serde_as(as = "DefaultOnNull")]
    pub damage_done: f64,
    #[serde(rename = "damageTaken")]
    #[serde_as(as = "DefaultOnNull")]
    pub damage_taken: f64,
    #[serde(rename = "teamPlacement")]
    pub team_placement: Option<f64>,
    #[serde(rename = "gulagKills")]
    #[serde_as(as = "DefaultOnNull")]
    pub gulag_kills: f64,
    #[serde(rename = "gulagDeaths")]
    #[serde_as(as = "DefaultOnNull")]
    pub gulag_deaths: f64,
    #[serde(rename = "timePlayed")]
    #[serde_as(as = "DefaultOnNull")]
    pub time_played: f64,
    #[serde(rename = "percentTimeMoving")]
    #[serde_as(as = "DefaultOnNull")]
    pub percent_time_moving: f64,
    #[serde(rename = "scorePerMinute")]
    #[serde_as(as = "DefaultOnNull")]
    pub score_per_minute: f64,
    #[serde(rename = "longestStreak")]
    #[serde_as(as = "DefaultOnNull")]
    pub longest_streak: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub score: f64,
    #[serde(rename = "totalXp")]
    #[serde_as(as = "DefaultOnNull")]
    pub total_xp: f64,
}

impl RawPlayerStats {
    /// Placement as a whole number; the API sometimes reports fractions or
    /// nothing for unfinished matches.
    pub fn placement(&self) -> Option<u32> {
        self.team_placement
            .filter(|p| *p >= 1.0 && p.fract() == 0.0)
            .map(|p| p as u32)
    }
}

/// Response of the profile endpoint.
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileStats {
    #[serde_as(as = "DefaultOnNull")]
    pub level: f64,
    pub lifetime: Option<ModeBreakdown>,
    pub weekly: Option<ModeBreakdown>,
    /// Day start (epoch millis, as a string) to per-mode totals. The
    /// combined mode is keyed `all` here rather than `br_all`.
    #[serde(rename = "periodSummaries")]
    #[serde_as(as = "DefaultOnNull")]
    pub period_summaries: BTreeMap<String, BTreeMap<String, Option<DayModeStats>>>,
}

#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeBreakdown {
    #[serde_as(as = "DefaultOnNull")]
    pub mode: BTreeMap<String, ModeStats>,
}

#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeStats {
    #[serde_as(as = "DefaultOnNull")]
    pub properties: ModeProperties,
}

/// Totals for one mode. Lifetime and weekly blocks fill different subsets.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeProperties {
    #[serde(rename = "gamesPlayed")]
    #[serde_as(as = "DefaultOnNull")]
    pub games_played: f64,
    #[serde(rename = "matchesPlayed")]
    #[serde_as(as = "DefaultOnNull")]
    pub matches_played: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub wins: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub kills: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub deaths: f64,
    #[serde(rename = "kdRatio")]
    #[serde_as(as = "DefaultOnNull")]
    pub kd_ratio: f64,
    #[serde(rename = "timePlayed")]
    #[serde_as(as = "DefaultOnNull")]
    pub time_played: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub downs: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub revives: f64,
    #[serde(rename = "topFive")]
    #[serde_as(as = "DefaultOnNull")]
    pub top_five: f64,
    #[serde(rename = "topTen")]
    #[serde_as(as = "DefaultOnNull")]
    pub top_ten: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub assists: f64,
    #[serde(rename = "damageDone")]
    #[serde_as(as = "DefaultOnNull")]
    pub damage_done: f64,
    #[serde(rename = "headshotPercentage")]
    #[serde_as(as = "DefaultOnNull")]
    pub headshot_percentage: f64,
    #[serde(rename = "avgLifeTime")]
    #[serde_as(as = "DefaultOnNull")]
    pub avg_life_time: f64,
    #[serde(rename = "objectiveTeamWiped")]
    #[serde_as(as = "DefaultOnNull")]
    pub objective_team_wiped: f64,
    #[serde(rename = "killsPerGame")]
    #[serde_as(as = "DefaultOnNull")]
    pub kills_per_game: f64,
    /// Not reported for every mode.
    #[serde(rename = "gulagKills")]
    pub gulag_kills: Option<f64>,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayModeStats {
    #[serde_as(as = "DefaultOnNull")]
    pub kills: f64,
    #[serde_as(as = "DefaultOnNull")]
    pub deaths: f64,
    #[serde(rename = "kdRatio")]
    #[serde_as(as = "DefaultOnNull")]
    pub kd_ratio: f64,
}

impl ProfileStats {
    pub fn lifetime_mode(&self, mode: &str) -> Option<&ModeProperties> {
        mode_properties(self.lifetime.as_ref(), mode)
    }

    pub fn weekly_mode(&self, mode: &str) -> Option<&ModeProperties> {
        mode_properties(self.weekly.as_ref(), mode)
    }

    pub fn lifetime_br(&self) -> Option<&ModeProperties> {
        self.lifetime_mode(ALL_BR_MODES)
    }

    pub fn weekly_br(&self) -> Option<&ModeProperties> {
        self.weekly_mode(ALL_BR_MODES)
    }
}

fn mode_properties<'a>(breakdown: Option<&'a ModeBreakdown>, mode: &str) -> Option<&'a ModeProperties> {
    breakdown
        .and_then(|b| b.mode.get(mode))
        .map(|m| &m.properties)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_history_tolerates_missing_fields() {
        let history: MatchHistory = serde_json::from_str(
            r#"{"matches":[{"matchID":"123","playerStats":{"kills":4.0,"teamPlacement":7}}]}"#,
        )
        .unwrap();
        let m = &history.matches[0];
        assert_eq!(m.match_id, "123");
        assert_eq!(m.player_stats.kills, 4.0);
        assert_eq!(m.player_stats.deaths, 0.0);
        assert_eq!(m.player_stats.placement(), Some(7));
        assert_eq!(m.player.uno, "");
    }

    #[test]
    fn test_match_history_null_fields_read_as_zero() {
        let history: MatchHistory = serde_json::from_str(
            r#"{"matches":[{"matchID":"9","mode":null,"player":null,
                "playerStats":{"kills":3,"gulagKills":null,"gulagDeaths":null,"teamPlacement":null}}]}"#,
        )
        .unwrap();
        let m = &history.matches[0];
        assert_eq!(m.mode, "");
        assert_eq!(m.player.team, "");
        assert_eq!(m.player_stats.kills, 3.0);
        assert_eq!(m.player_stats.gulag_kills, 0.0);
        assert_eq!(m.player_stats.placement(), None);

        let empty: MatchHistory = serde_json::from_str(r#"{"matches":null}"#).unwrap();
        assert!(empty.matches.is_empty());
    }

    #[test]
    fn test_fractional_placement_ignored() {
        let stats = RawPlayerStats {
            team_placement: Some(2.5),
            ..Default::default()
        };
        assert_eq!(stats.placement(), None);
        assert_eq!(RawPlayerStats::default().placement(), None);
    }

    #[test]
    fn test_profile_mode_lookup() {
        let profile: ProfileStats = serde_json::from_str(
            r#"{"level":120,"lifetime":{"mode":{
                "br_all":{"properties":{"wins":12,"kills":900}},
                "br_dmz":{"properties":{"wins":2,"kills":null}}}}}"#,
        )
        .unwrap();
        let lifetime = profile.lifetime_br().unwrap();
        assert_eq!(lifetime.wins, 12.0);
        assert_eq!(lifetime.kills, 900.0);
        assert_eq!(profile.lifetime_mode("br_dmz").unwrap().kills, 0.0);
        assert!(profile.lifetime_mode("br").is_none());
        assert!(profile.weekly_br().is_none());
    }

    #[test]
    fn test_profile_null_counters_read_as_zero() {
        let profile: ProfileStats = serde_json::from_str(
            r#"{"level":null,"lifetime":{"mode":{"br_all":{"properties":{"wins":null,"gamesPlayed":10}}}},
                "weekly":null,"periodSummaries":null}"#,
        )
        .unwrap();
        assert_eq!(profile.level, 0.0);
        assert_eq!(profile.lifetime_br().unwrap().wins, 0.0);
        assert_eq!(profile.lifetime_br().unwrap().games_played, 10.0);
        assert!(profile.period_summaries.is_empty());
    }

    #[test]
    fn test_period_summaries_decode() {
        let profile: ProfileStats = serde_json::from_str(
            r#"{"periodSummaries":{"1609804800000":{"all":{"kills":5,"deaths":2,"kdRatio":2.5},"br":null}}}"#,
        )
        .unwrap();
        let day = &profile.period_summaries["1609804800000"];
        assert_eq!(day["all"].as_ref().unwrap().kills, 5.0);
        assert!(day["br"].is_none());
    }
}
