use serde::Serialize;

use super::count;
use crate::models::ProfileStats;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LifetimeTotals {
    pub games_played: u32,
    pub wins: u32,
    pub kills: u32,
    pub deaths: u32,
    pub kd_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct WeeklyTotals {
    pub kills: u32,
    pub deaths: u32,
    pub kd_ratio: f64,
}

/// Battle royale totals shown at the top of a profile.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProfileOverview {
    pub level: u32,
    pub lifetime: LifetimeTotals,
    /// Zeros when the player has not played this week.
    pub weekly: WeeklyTotals,
}

impl ProfileOverview {
    pub fn from_stats(stats: &ProfileStats) -> Self {
        let lifetime = stats
            .lifetime_br()
            .map(|p| LifetimeTotals {
                games_played: count(p.games_played),
                wins: count(p.wins),
                kills: count(p.kills),
                deaths: count(p.deaths),
                kd_ratio: p.kd_ratio,
            })
            .unwrap_or_default();

        let weekly = stats
            .weekly_br()
            .map(|p| WeeklyTotals {
                kills: count(p.kills),
                deaths: count(p.deaths),
                kd_ratio: p.kd_ratio,
            })
            .unwrap_or_default();

        Self {
            level: count(stats.level),
            lifetime,
            weekly,
        }
    }

    pub fn win_percentage(&self) -> f64 {
        if self.lifetime.games_played == 0 {
            0.0
        } else {
            self.lifetime.wins as f64 * 100.0 / self.lifetime.games_played as f64
        }
    }
}
