use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};
use unicode_normalization::UnicodeNormalization;

const WEEKDAY_NAMES: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

const MONTH_NAMES: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Case-insensitive but accent-sensitive equality: `"ALPHA" == "alpha"`,
/// `"É" == "é"`, `"e" != "é"`.
///
/// Width and composition are ignored too, so full-width `"Ａlpha"` matches
/// `"alpha"` and a precomposed `é` matches `e` + combining acute.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    fold(a).eq(fold(b))
}

/// Compatibility-decompose, lowercase, then recompose so accents survive
/// as a difference while case and width do not.
fn fold(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfkd().flat_map(char::to_lowercase).nfkc()
}

/// Format a match end time as `JAN 5 3:07PM` in the given timezone.
pub fn format_match_date<Tz: TimeZone>(utc_seconds: i64, tz: &Tz) -> String {
    let Some(utc) = DateTime::from_timestamp(utc_seconds, 0) else {
        return "N/A".to_string();
    };
    let dt = utc.with_timezone(tz);
    let (is_pm, hour) = dt.hour12();

    format!(
        "{} {} {}:{:02}{}",
        MONTH_NAMES[dt.month0() as usize],
        dt.day(),
        hour,
        dt.minute(),
        if is_pm { "PM" } else { "AM" }
    )
}

/// [`format_match_date`] in the device's local timezone
pub fn format_match_date_local(utc_seconds: i64) -> String {
    format_match_date(utc_seconds, &Local)
}

/// Three-letter weekday of an epoch-millisecond timestamp, e.g. `MON`.
pub fn format_weekday<Tz: TimeZone>(utc_millis: i64, tz: &Tz) -> String {
    match DateTime::from_timestamp_millis(utc_millis) {
        Some(utc) => {
            let day = utc.with_timezone(tz).weekday().num_days_from_sunday();
            WEEKDAY_NAMES[day as usize].to_string()
        }
        None => "-".to_string(),
    }
}

/// Which units `format_time_played` may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeUnits {
    pub hours: bool,
    pub minutes: bool,
    pub seconds: bool,
}

impl Default for TimeUnits {
    fn default() -> Self {
        Self {
            hours: true,
            minutes: true,
            seconds: false,
        }
    }
}

impl TimeUnits {
    pub const ALL: TimeUnits = TimeUnits {
        hours: true,
        minutes: true,
        seconds: true,
    };
}

/// Format a duration in seconds as `1h 2m 3s`, skipping zero-valued units.
pub fn format_time_played(seconds: u64, units: TimeUnits) -> String {
    let mut remaining = seconds;
    let mut parts = Vec::new();

    if units.hours {
        let hours = remaining / 3600;
        if hours > 0 {
            parts.push(format!("{}h", hours));
            remaining %= 3600;
        }
    }
    if units.minutes {
        let minutes = remaining / 60;
        if minutes > 0 {
            parts.push(format!("{}m", minutes));
            remaining %= 60;
        }
    }
    if units.seconds && remaining > 0 {
        parts.push(format!("{}s", remaining));
    }

    if parts.is_empty() {
        let fallback = if units.seconds {
            "0s"
        } else if units.minutes {
            "0m"
        } else if units.hours {
            "0h"
        } else {
            ""
        };
        return fallback.to_string();
    }

    parts.join(" ")
}
