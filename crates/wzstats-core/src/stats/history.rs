use serde::Serialize;

use super::{count, gulag_result, GulagOutcome};
use crate::models::RawMatch;

/// One line of the recent-matches list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRow {
    pub id: String,
    pub uno: String,
    pub mode: String,
    pub placement: Option<u32>,
    pub kills: u32,
    pub deaths: u32,
    pub damage: u32,
    pub gulag: GulagOutcome,
    pub utc_start_seconds: i64,
    pub utc_end_seconds: i64,
}

/// Header card above the recent-matches list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub number_of_matches: usize,
    pub best_game_kills: u32,
    /// `None` when no match reported a whole-number placement.
    pub best_placement: Option<u32>,
    pub best_placement_count: u32,
    pub gulag_wins: u32,
    pub gulag_losses: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchHistoryView {
    pub summary: Option<MatchSummary>,
    pub rows: Vec<MatchRow>,
}

pub fn summarize_matches(matches: &[RawMatch]) -> MatchHistoryView {
    let mut best_game_kills = 0;
    let mut best_placement: Option<u32> = None;
    let mut best_placement_count = 0;
    let mut gulag_wins = 0;
    let mut gulag_losses = 0;

    let rows: Vec<MatchRow> = matches
        .iter()
        .map(|m| {
            let stats = &m.player_stats;
            let kills = count(stats.kills);
            best_game_kills = best_game_kills.max(kills);

            let placement = stats.placement();
            if let Some(p) = placement {
                match best_placement {
                    Some(best) if p > best => {}
                    Some(best) if p == best => best_placement_count += 1,
                    _ => {
                        best_placement = Some(p);
                        best_placement_count = 1;
                    }
                }
            }

            let gulag = gulag_result(stats.gulag_kills, stats.gulag_deaths);
            match gulag {
                GulagOutcome::Won => gulag_wins += 1,
                GulagOutcome::Lost => gulag_losses += 1,
                GulagOutcome::NotPlayed => {}
            }

            MatchRow {
                id: m.match_id.clone(),
                uno: m.player.uno.clone(),
                mode: m.mode.clone(),
                placement,
                kills,
                deaths: count(stats.deaths),
                damage: count(stats.damage_done),
                gulag,
                utc_start_seconds: m.utc_start_seconds,
                utc_end_seconds: m.utc_end_seconds,
            }
        })
        .collect();

    let summary = (!rows.is_empty()).then(|| MatchSummary {
        number_of_matches: rows.len(),
        best_game_kills,
        best_placement,
        best_placement_count,
        gulag_wins,
        gulag_losses,
    });

    MatchHistoryView { summary, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RawPlayerStats, RawMatch};

    fn raw(id: &str, kills: f64, placement: Option<f64>, gulag: (f64, f64)) -> RawMatch {
        RawMatch {
            match_id: id.to_string(),
            mode: "br_brquads".to_string(),
            utc_start_seconds: 100,
            utc_end_seconds: 1_900,
            player_stats: RawPlayerStats {
                kills,
                deaths: 2.0,
                damage_done: 1234.0,
                team_placement: placement,
                gulag_kills: gulag.0,
                gulag_deaths: gulag.1,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_history_has_no_summary() {
        let view = summarize_matches(&[]);
        assert!(view.summary.is_none());
        assert!(view.rows.is_empty());
    }

    #[test]
    fn test_summary_counts() {
        let matches = vec![
            raw("a", 3.0, Some(5.0), (1.0, 0.0)),
            raw("b", 11.0, Some(2.0), (0.0, 1.0)),
            raw("c", 0.0, None, (0.0, 0.0)),
            raw("d", 6.0, Some(2.0), (1.0, 0.0)),
            raw("e", 1.0, Some(3.5), (0.0, 0.0)),
        ];
        let view = summarize_matches(&matches);
        let summary = view.summary.unwrap();

        assert_eq!(summary.number_of_matches, 5);
        assert_eq!(summary.best_game_kills, 11);
        assert_eq!(summary.best_placement, Some(2));
        assert_eq!(summary.best_placement_count, 2);
        assert_eq!(summary.gulag_wins, 2);
        assert_eq!(summary.gulag_losses, 1);

        assert_eq!(view.rows.len(), 5);
        assert_eq!(view.rows[0].id, "a");
        assert_eq!(view.rows[2].placement, None);
        assert_eq!(view.rows[4].placement, None);
        assert_eq!(view.rows[1].damage, 1234);
    }

    #[test]
    fn test_better_placement_resets_count() {
        let matches = vec![
            raw("a", 0.0, Some(4.0), (0.0, 0.0)),
            raw("b", 0.0, Some(4.0), (0.0, 0.0)),
            raw("c", 0.0, Some(1.0), (0.0, 0.0)),
        ];
        let summary = summarize_matches(&matches).summary.unwrap();
        assert_eq!(summary.best_placement, Some(1));
        assert_eq!(summary.best_placement_count, 1);
    }

    #[test]
    fn test_no_placements_reported() {
        let matches = vec![raw("a", 2.0, None, (0.0, 0.0))];
        let summary = summarize_matches(&matches).summary.unwrap();
        assert_eq!(summary.best_placement, None);
        assert_eq!(summary.best_placement_count, 0);
    }
}
