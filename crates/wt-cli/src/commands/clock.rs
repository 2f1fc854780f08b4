//! Clock-in, clock-out and clear.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use wt_core::TrackingSession;

use crate::App;
use crate::commands::util::{format_minutes, format_time};

/// Records `at` as the entry for `day` and prints the estimated exit.
pub fn clock_in<W: Write>(
    writer: &mut W,
    app: &App,
    day: &str,
    at: DateTime<Utc>,
    consider_accumulated: bool,
) -> Result<()> {
    let mut session = TrackingSession::resume(&app.week, &app.prefs, day, consider_accumulated)?;
    let estimated_exit = session.clock_in(&app.week, &app.prefs, at, consider_accumulated)?;

    writeln!(writer, "Clocked in on {day} at {}", format_time(at, app.offset))?;
    if let Some(exit) = estimated_exit {
        writeln!(writer, "Estimated exit: {}", format_time(exit, app.offset))?;
    }
    Ok(())
}

/// Records `at` as the exit for `day` and prints the time worked.
pub fn clock_out<W: Write>(writer: &mut W, app: &App, day: &str, at: DateTime<Utc>) -> Result<()> {
    let mut session = TrackingSession::resume(&app.week, &app.prefs, day, false)?;
    let schedule = session.clock_out(&app.week, at)?;

    writeln!(writer, "Clocked out of {day} at {}", format_time(at, app.offset))?;
    writeln!(writer, "Worked: {}", format_minutes(schedule.duration()))?;
    Ok(())
}

/// Discards the entry and exit recorded for `day`.
pub fn clear<W: Write>(writer: &mut W, app: &App, day: &str) -> Result<()> {
    let mut session = TrackingSession::resume(&app.week, &app.prefs, day, false)?;
    session.clear(&app.week);
    writeln!(writer, "Cleared {day}")?;
    Ok(())
}
