//! UTC week arithmetic for the news trigger. All math is done on Unix
//! seconds with explicit UTC weekdays, so behavior never depends on
//! the host timezone.

use chrono::{DateTime, Datelike, TimeZone, Utc};

pub const DAY_SECS: i64 = 24 * 3600;
pub const WEEK_SECS: i64 = 7 * DAY_SECS;

/// The next weekly boundary (Monday 00:00 UTC) strictly after `after`.
pub fn next_weekly_boundary(after: f64) -> i64 {
    let t = after.floor() as i64;
    // Unix day boundaries coincide with UTC midnights
    let day_start = t - t.rem_euclid(DAY_SECS);
    let days_from_monday = Utc
        .timestamp_opt(day_start, 0)
        .single()
        .map(|d| d.weekday().num_days_from_monday() as i64)
        .unwrap_or(0);

    let mut boundary = day_start - days_from_monday * DAY_SECS;
    while (boundary as f64) <= after {
        boundary += WEEK_SECS;
    }
    boundary
}

/// Whether a weekly boundary falls in `(prev, new]`.
///
/// Computing the single next boundary after `prev` keeps this correct
/// for arbitrarily large jumps: a tick that skips several weeks still
/// reports a crossing, and a tick that does not advance time never does.
pub fn crossed_weekly_boundary(prev: f64, new: f64) -> bool {
    if prev >= new {
        return false;
    }
    next_weekly_boundary(prev) as f64 <= new
}

/// Timestamp seven days before `t`.
pub fn week_ago(t: f64) -> f64 {
    t - WEEK_SECS as f64
}

/// Render a simulated timestamp for logs ("Aug 21, 2017 00:00 UTC").
pub fn format_sim_time(t: f64) -> String {
    match Utc.timestamp_opt(t.floor() as i64, 0).single() {
        Some(dt) => format_utc(dt),
        None => format!("{t}"),
    }
}

fn format_utc(dt: DateTime<Utc>) -> String {
    dt.format("%b %-d, %Y %H:%M UTC").to_string()
}
