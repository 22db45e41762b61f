use chrono::TimeZone;
use serde::Serialize;

use super::count;
use crate::models::{ModeProperties, ProfileStats, ALL_BR_MODES};
use crate::utils::format_weekday;

/// Modes offered on the lifetime screen, in display order.
pub const LIFETIME_MODES: [(&str, &str); 3] = [
    (ALL_BR_MODES, "All"),
    ("br", "Battle Royale"),
    ("br_dmz", "Plunder"),
];

/// Daily summaries key the combined mode as `all`.
const DAILY_ALL_MODES: &str = "all";

/// Display name for a mode id; unknown modes show their id.
pub fn mode_name(mode: &str) -> &str {
    LIFETIME_MODES
        .iter()
        .find(|(id, _)| *id == mode)
        .map(|(_, name)| *name)
        .unwrap_or(mode)
}

fn percent_of(part: f64, games: f64) -> f64 {
    if games > 0.0 {
        part * 100.0 / games
    } else {
        0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LifetimeModeView {
    pub mode: String,
    pub name: String,
    pub games_played: u32,
    pub time_played: u64,
    pub kills: u32,
    pub deaths: u32,
    pub kills_per_game: f64,
    pub kd_ratio: f64,
    pub downs: u32,
    pub revives: u32,
    pub wins: u32,
    pub win_percentage: f64,
    pub top_five: u32,
    pub top_five_percentage: f64,
    pub top_ten: u32,
    pub top_ten_percentage: f64,
}

impl LifetimeModeView {
    fn new(mode: &str, p: &ModeProperties) -> Self {
        Self {
            mode: mode.to_string(),
            name: mode_name(mode).to_string(),
            games_played: count(p.games_played),
            time_played: p.time_played.max(0.0) as u64,
            kills: count(p.kills),
            deaths: count(p.deaths),
            kills_per_game: if p.games_played > 0.0 {
                p.kills / p.games_played
            } else {
                0.0
            },
            kd_ratio: p.kd_ratio,
            downs: count(p.downs),
            revives: count(p.revives),
            wins: count(p.wins),
            win_percentage: percent_of(p.wins, p.games_played),
            top_five: count(p.top_five),
            top_five_percentage: percent_of(p.top_five, p.games_played),
            top_ten: count(p.top_ten),
            top_ten_percentage: percent_of(p.top_ten, p.games_played),
        }
    }
}

/// Lifetime totals for the modes on the lifetime screen. Modes missing
/// from the payload are left out.
pub fn lifetime_modes(stats: &ProfileStats) -> Vec<LifetimeModeView> {
    LIFETIME_MODES
        .iter()
        .filter_map(|(mode, _)| stats.lifetime_mode(mode).map(|p| LifetimeModeView::new(mode, p)))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyModeView {
    pub mode: String,
    pub name: String,
    pub matches_played: u32,
    pub time_played: u64,
    pub avg_life_time: u64,
    pub kills: u32,
    pub deaths: u32,
    pub kd_ratio: f64,
    pub assists: u32,
    pub damage_done: u32,
    pub headshot_percentage: f64,
    /// `None` renders as "-".
    pub gulag_kills: Option<u32>,
    pub objective_team_wiped: u32,
    pub kills_per_game: f64,
    /// Week beats the lifetime battle royale k/d.
    pub kd_above_lifetime: bool,
    pub kills_per_game_above_lifetime: bool,
}

/// Mode ids present in the weekly block, `br_all` first.
pub fn weekly_modes(stats: &ProfileStats) -> Vec<String> {
    let mut modes: Vec<String> = stats
        .weekly
        .as_ref()
        .map(|w| w.mode.keys().cloned().collect())
        .unwrap_or_default();
    modes.sort_by_key(|m| m.as_str() != ALL_BR_MODES);
    modes
}

/// Weekly totals for one mode, compared against the lifetime battle royale
/// numbers. `None` when the player has no weekly data for the mode.
pub fn weekly_mode_view(stats: &ProfileStats, mode: &str) -> Option<WeeklyModeView> {
    let p = stats.weekly_mode(mode)?;
    let lifetime = stats.lifetime_br().cloned().unwrap_or_default();
    let lifetime_kpg = if lifetime.games_played > 0.0 {
        lifetime.kills / lifetime.games_played
    } else {
        0.0
    };

    Some(WeeklyModeView {
        mode: mode.to_string(),
        name: mode_name(mode).to_string(),
        matches_played: count(p.matches_played),
        time_played: p.time_played.max(0.0) as u64,
        avg_life_time: p.avg_life_time.max(0.0).round() as u64,
        kills: count(p.kills),
        deaths: count(p.deaths),
        kd_ratio: p.kd_ratio,
        assists: count(p.assists),
        damage_done: count(p.damage_done),
        headshot_percentage: p.headshot_percentage * 100.0,
        gulag_kills: p.gulag_kills.map(count),
        objective_team_wiped: count(p.objective_team_wiped),
        kills_per_game: p.kills_per_game,
        kd_above_lifetime: p.kd_ratio >= lifetime.kd_ratio,
        kills_per_game_above_lifetime: p.kills_per_game >= lifetime_kpg,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTotals {
    pub kills: u32,
    pub deaths: u32,
    pub kd_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayRow {
    /// Start of the day, epoch millis.
    pub utc: i64,
    /// Three-letter weekday, e.g. "TUE".
    pub day: String,
    /// `None` when the player skipped the mode that day; rendered as "-".
    pub totals: Option<DayTotals>,
}

/// Per-day totals for one mode, newest first. Every day in the summaries
/// gets a row, played or not. Keys that are not epoch millis are skipped.
pub fn daily_breakdown<Tz: TimeZone>(stats: &ProfileStats, mode: &str, tz: &Tz) -> Vec<DayRow> {
    let key = if mode == ALL_BR_MODES { DAILY_ALL_MODES } else { mode };

    let mut rows: Vec<DayRow> = stats
        .period_summaries
        .iter()
        .filter_map(|(utc, modes)| {
            let utc = utc.parse::<i64>().ok()?;
            let totals = modes.get(key).and_then(Option::as_ref).map(|d| DayTotals {
                kills: count(d.kills),
                deaths: count(d.deaths),
                kd_ratio: d.kd_ratio,
            });
            Some(DayRow {
                utc,
                day: format_weekday(utc, tz),
                totals,
            })
        })
        .collect();

    rows.sort_by(|a, b| b.utc.cmp(&a.utc));
    rows
}
