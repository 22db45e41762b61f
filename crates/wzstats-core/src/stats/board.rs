use serde::Serialize;

use super::{count, gulag_result, GulagOutcome};
use crate::models::RawMatch;

/// One participant's line on the match screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardPlayer {
    pub uno: String,
    pub username: String,
    pub team: String,
    pub is_current_player: bool,
    pub placement: Option<u32>,
    pub kills: u32,
    pub deaths: u32,
    pub headshots: u32,
    pub assists: u32,
    pub damage: u32,
    pub damage_taken: u32,
    pub gulag: GulagOutcome,
    pub time_played: u64,
    pub percent_time_moving: f64,
    pub score_per_minute: f64,
    pub longest_streak: u32,
    pub score: u32,
    pub total_xp: u32,
}

impl BoardPlayer {
    fn from_raw(raw: &RawMatch, current_uno: Option<&str>) -> Self {
        let stats = &raw.player_stats;
        Self {
            uno: raw.player.uno.clone(),
            username: raw.player.username.clone(),
            team: raw.player.team.clone(),
            is_current_player: current_uno.is_some_and(|uno| uno == raw.player.uno),
            placement: stats.placement(),
            kills: count(stats.kills),
            deaths: count(stats.deaths),
            headshots: count(stats.headshots),
            assists: count(stats.assists),
            damage: count(stats.damage_done),
            damage_taken: count(stats.damage_taken),
            gulag: gulag_result(stats.gulag_kills, stats.gulag_deaths),
            time_played: count(stats.time_played) as u64,
            percent_time_moving: stats.percent_time_moving,
            score_per_minute: stats.score_per_minute,
            longest_streak: count(stats.longest_streak),
            score: count(stats.score),
            total_xp: count(stats.total_xp),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamStanding {
    pub team: String,
    pub placement: Option<u32>,
    pub kills: u32,
    pub deaths: u32,
    pub damage: u32,
    /// Ordered by kills, highest first.
    pub players: Vec<BoardPlayer>,
    pub is_current_team: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchBoard {
    pub match_id: String,
    pub mode: String,
    pub utc_end_seconds: i64,
    pub player_count: Option<u32>,
    pub team_count: Option<u32>,
    /// Every participant, highest kills first.
    pub players: Vec<BoardPlayer>,
    /// Teams by placement. When the current player's team did not win, a
    /// copy of it is pinned at index 0 and the ranked original is unflagged.
    pub teams: Vec<TeamStanding>,
}

/// Groups a match's participants into teams.
///
/// Returns `None` for an empty participant list, which the API returns for
/// matches it failed to load.
pub fn build_match_board(
    match_id: &str,
    participants: &[RawMatch],
    current_uno: Option<&str>,
) -> Option<MatchBoard> {
    let first = participants.first()?;

    let mut players: Vec<BoardPlayer> = participants
        .iter()
        .map(|raw| BoardPlayer::from_raw(raw, current_uno))
        .collect();
    // Stable: ties keep API order
    players.sort_by(|a, b| b.kills.cmp(&a.kills));

    let mut teams: Vec<TeamStanding> = Vec::new();
    for player in &players {
        match teams.iter_mut().find(|t| t.team == player.team) {
            Some(team) => {
                team.kills = team.kills.saturating_add(player.kills);
                team.deaths = team.deaths.saturating_add(player.deaths);
                team.damage = team.damage.saturating_add(player.damage);
                team.is_current_team |= player.is_current_player;
                team.players.push(player.clone());
            }
            None => teams.push(TeamStanding {
                team: player.team.clone(),
                placement: player.placement,
                kills: player.kills,
                deaths: player.deaths,
                damage: player.damage,
                players: vec![player.clone()],
                is_current_team: player.is_current_player,
            }),
        }
    }

    teams.sort_by_key(|t| t.placement.unwrap_or(u32::MAX));

    if let Some(idx) = teams
        .iter()
        .position(|t| t.is_current_team && t.placement.is_some_and(|p| p > 1))
    {
        let pinned = teams[idx].clone();
        teams[idx].is_current_team = false;
        teams.insert(0, pinned);
    }

    Some(MatchBoard {
        match_id: match_id.to_string(),
        mode: first.mode.clone(),
        utc_end_seconds: first.utc_end_seconds,
        player_count: first.player_count,
        team_count: first.team_count,
        players,
        teams,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RawPlayer, RawPlayerStats};

    fn participant(uno: &str, team: &str, kills: f64, placement: Option<f64>) -> RawMatch {
        RawMatch {
            match_id: "m1".to_string(),
            mode: "br_brtrios".to_string(),
            utc_end_seconds: 5_000,
            player_count: Some(150),
            team_count: Some(50),
            player: RawPlayer {
                uno: uno.to_string(),
                username: format!("user-{}", uno),
                team: team.to_string(),
            },
            player_stats: RawPlayerStats {
                kills,
                deaths: 1.0,
                damage_done: kills * 100.0,
                team_placement: placement,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn sample() -> Vec<RawMatch> {
        vec![
            participant("1", "team_a", 2.0, Some(3.0)),
            participant("2", "team_b", 9.0, Some(1.0)),
            participant("3", "team_a", 5.0, Some(3.0)),
            participant("4", "team_c", 1.0, Some(2.0)),
            participant("5", "team_b", 0.0, Some(1.0)),
        ]
    }

    #[test]
    fn test_empty_match_has_no_board() {
        assert!(build_match_board("m1", &[], None).is_none());
    }

    #[test]
    fn test_players_sorted_by_kills() {
        let board = build_match_board("m1", &sample(), None).unwrap();
        let order: Vec<&str> = board.players.iter().map(|p| p.uno.as_str()).collect();
        assert_eq!(order, vec!["2", "3", "1", "4", "5"]);
        assert_eq!(board.player_count, Some(150));
        assert_eq!(board.mode, "br_brtrios");
    }

    #[test]
    fn test_teams_grouped_and_ranked() {
        let board = build_match_board("m1", &sample(), None).unwrap();
        let order: Vec<&str> = board.teams.iter().map(|t| t.team.as_str()).collect();
        assert_eq!(order, vec!["team_b", "team_c", "team_a"]);

        let team_a = &board.teams[2];
        assert_eq!(team_a.kills, 7);
        assert_eq!(team_a.deaths, 2);
        assert_eq!(team_a.damage, 700);
        assert_eq!(team_a.players[0].uno, "3");
        assert!(!team_a.is_current_team);
    }

    #[test]
    fn test_current_losing_team_pinned_first() {
        let board = build_match_board("m1", &sample(), Some("1")).unwrap();
        let order: Vec<&str> = board.teams.iter().map(|t| t.team.as_str()).collect();
        assert_eq!(order, vec!["team_a", "team_b", "team_c", "team_a"]);

        assert!(board.teams[0].is_current_team);
        assert!(!board.teams[3].is_current_team);
        assert!(board.players.iter().find(|p| p.uno == "1").unwrap().is_current_player);
    }

    #[test]
    fn test_current_winning_team_not_duplicated() {
        let board = build_match_board("m1", &sample(), Some("5")).unwrap();
        assert_eq!(board.teams.len(), 3);
        assert_eq!(board.teams[0].team, "team_b");
        assert!(board.teams[0].is_current_team);
    }

    #[test]
    fn test_unplaced_teams_sort_last() {
        let participants = vec![
            participant("1", "x", 1.0, None),
            participant("2", "y", 1.0, Some(4.0)),
        ];
        let board = build_match_board("m2", &participants, Some("1")).unwrap();
        let order: Vec<&str> = board.teams.iter().map(|t| t.team.as_str()).collect();
        assert_eq!(order, vec!["y", "x"]);
    }

    #[test]
    fn test_team_totals_saturate() {
        let participants = vec![
            participant("1", "x", 1e12, Some(1.0)),
            participant("2", "x", 1e12, Some(1.0)),
        ];
        let board = build_match_board("m3", &participants, None).unwrap();
        assert_eq!(board.teams[0].kills, u32::MAX);
        assert_eq!(board.teams[0].damage, u32::MAX);
        assert_eq!(board.teams[0].deaths, 2);
    }
}
