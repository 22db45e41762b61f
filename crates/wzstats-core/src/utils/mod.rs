//! Utility functions for string comparison and formatting.

pub mod format;

// Re-export commonly used functions at module level
pub use format::{
    eq_ignore_case, format_match_date, format_match_date_local, format_time_played, format_weekday,
    TimeUnits,
};
