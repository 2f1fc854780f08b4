//! Shared utilities for CLI commands.

use anyhow::Context;
use chrono::{DateTime, FixedOffset, NaiveTime, Utc};

/// Parse a time as either RFC 3339 or a wall-clock `HH:MM` on the day of `now`.
///
/// Supports:
/// - RFC 3339: "2026-01-15T09:30:00Z"
/// - Wall clock: "09:30", read in `offset`
pub fn parse_time(s: &str, now: DateTime<Utc>, offset: FixedOffset) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    let time = NaiveTime::parse_from_str(s, "%H:%M").with_context(|| {
        format!("Invalid time: {s}. Use RFC 3339 (e.g., 2026-01-15T09:30:00Z) or HH:MM")
    })?;
    let date = now.with_timezone(&offset).date_naive();
    let local = date
        .and_time(time)
        .and_local_timezone(offset)
        .single()
        .with_context(|| format!("Invalid time: {s}"))?;
    Ok(local.with_timezone(&Utc))
}

/// `HH:MM` wall-clock time in `offset`.
pub fn format_time(t: DateTime<Utc>, offset: FixedOffset) -> String {
    t.with_timezone(&offset).format("%H:%M").to_string()
}

/// Signed minutes as `HH:MM`, e.g. `-00:30`.
#[expect(
    clippy::cast_possible_truncation,
    reason = "durations within a week fit comfortably in i64 minutes"
)]
pub fn format_minutes(minutes: f64) -> String {
    let mins = minutes.round() as i64;
    let sign = if mins < 0 { "-" } else { "" };
    let m = mins.abs();
    format!("{sign}{:02}:{:02}", m / 60, m % 60)
}

/// Hours without a trailing `.0`, e.g. `7.5h`, `8h`.
pub fn format_hours(hours: f64) -> String {
    format!("{hours}h")
}
