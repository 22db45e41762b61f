//! Reshaping of stats payloads into what the front ends display.
//!
//! - `history`: per-match rows plus a summary of a player's recent matches
//! - `board`: one match's participants grouped into ranked teams
//! - `overview`: lifetime and weekly battle royale totals
//! - `modes`: per-mode lifetime and weekly views plus the daily breakdown

pub mod board;
pub mod history;
pub mod modes;
pub mod overview;

use serde::{Deserialize, Serialize};

pub use board::{build_match_board, BoardPlayer, MatchBoard, TeamStanding};
pub use history::{summarize_matches, MatchHistoryView, MatchRow, MatchSummary};
pub use modes::{
    daily_breakdown, lifetime_modes, mode_name, weekly_mode_view, weekly_modes, DayRow, DayTotals,
    LifetimeModeView, WeeklyModeView, LIFETIME_MODES,
};
pub use overview::{LifetimeTotals, ProfileOverview, WeeklyTotals};

/// How a player's gulag went in one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GulagOutcome {
    Won,
    Lost,
    NotPlayed,
}

/// A gulag kill means the player won their way back.
pub fn gulag_result(gulag_kills: f64, gulag_deaths: f64) -> GulagOutcome {
    if gulag_kills > 0.0 {
        GulagOutcome::Won
    } else if gulag_deaths > 0.0 {
        GulagOutcome::Lost
    } else {
        GulagOutcome::NotPlayed
    }
}

impl std::fmt::Display for GulagOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GulagOutcome::Won => write!(f, "W"),
            GulagOutcome::Lost => write!(f, "L"),
            GulagOutcome::NotPlayed => write!(f, "-"),
        }
    }
}

/// Stat counters arrive as floats; they are whole numbers in practice.
pub(crate) fn count(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round() as u32
    } else {
        0
    }
}
