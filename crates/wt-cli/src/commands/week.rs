//! Week, trackable-day and single-day views.

use std::io::Write;

use anyhow::Result;
use chrono::FixedOffset;
use serde::Serialize;
use wt_core::{Day, Locale};

use crate::App;
use crate::commands::util::{format_minutes, format_time};

const NO_TIME: &str = "--:--";

/// JSON view of one day.
#[derive(Debug, Serialize)]
struct DayView<'a> {
    #[serde(flatten)]
    day: &'a Day,
    trackable: bool,
    /// Worked minutes, present once both timestamps are set.
    minutes: Option<f64>,
}

impl<'a> DayView<'a> {
    fn new(day: &'a Day) -> Self {
        let complete = day.schedule.entry.is_some() && day.schedule.exit.is_some();
        Self {
            day,
            trackable: day.trackable,
            minutes: complete.then(|| day.schedule.duration()),
        }
    }
}

#[derive(Debug, Serialize)]
struct WeekView<'a> {
    locale: Locale,
    days: Vec<DayView<'a>>,
    worked_minutes: f64,
}

/// Minutes worked across the trackable days.
fn worked_minutes(days: &[Day]) -> f64 {
    days.iter()
        .filter(|d| d.trackable)
        .map(|d| d.schedule.duration())
        .sum()
}

/// One line per day: name, entry, exit, worked time and flags.
pub fn format_day(day: &Day, offset: FixedOffset) -> String {
    let time = |t: Option<_>| t.map_or_else(|| NO_TIME.to_string(), |t| format_time(t, offset));
    let worked = if day.schedule.entry.is_some() && day.schedule.exit.is_some() {
        format_minutes(day.schedule.duration())
    } else {
        NO_TIME.to_string()
    };

    let mut line = format!(
        "{:<10} {} - {}  {worked}",
        day.name,
        time(day.schedule.entry),
        time(day.schedule.exit),
    );

    let flags: Vec<&str> = [
        (day.holiday, "holiday"),
        (day.license, "license"),
        (!day.trackable, "untracked"),
    ]
    .into_iter()
    .filter_map(|(set, flag)| set.then_some(flag))
    .collect();
    if !flags.is_empty() {
        line.push_str(&format!("  [{}]", flags.join(", ")));
    }
    line
}

pub fn format_week(days: &[Day], offset: FixedOffset) -> String {
    let mut out = String::new();
    for day in days {
        out.push_str(&format_day(day, offset));
        out.push('\n');
    }
    out.push_str(&format!("Worked: {}\n", format_minutes(worked_minutes(days))));
    out
}

pub fn format_week_json(days: &[Day], locale: Locale) -> Result<String> {
    let view = WeekView {
        locale,
        days: days.iter().map(DayView::new).collect(),
        worked_minutes: worked_minutes(days),
    };
    Ok(serde_json::to_string_pretty(&view)?)
}

/// Prints the whole week.
pub fn run<W: Write>(writer: &mut W, app: &App, json: bool) -> Result<()> {
    let days = app.week.get_days();
    if json {
        writeln!(writer, "{}", format_week_json(&days, app.week.locale())?)?;
    } else {
        write!(writer, "{}", format_week(&days, app.offset))?;
    }
    Ok(())
}

/// Prints the days that take part in tracking.
pub fn trackable<W: Write>(writer: &mut W, app: &App) -> Result<()> {
    let days = app.week.trackable_days();
    if days.is_empty() {
        writeln!(writer, "No trackable days.")?;
        return Ok(());
    }
    for day in &days {
        writeln!(writer, "{}", format_day(day, app.offset))?;
    }
    Ok(())
}

/// Prints one day by canonical name.
pub fn day<W: Write>(writer: &mut W, app: &App, name: &str) -> Result<()> {
    let day = app.week.day(name)?;
    writeln!(writer, "{}", format_day(&day, app.offset))?;
    Ok(())
}

/// Replaces the week with empty default days and prints it.
pub fn reset<W: Write>(writer: &mut W, app: &App) -> Result<()> {
    let days = app.week.reset_to_default_week()?;
    writeln!(writer, "Week reset.")?;
    write!(writer, "{}", format_week(&days, app.offset))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::rc::Rc;

    use chrono::{TimeZone, Utc};
    use insta::assert_snapshot;
    use wt_core::{MemoryStore, Schedule};

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn app(locale: Locale) -> App {
        App::with_storage(Rc::new(MemoryStore::new()), locale, false, utc()).unwrap()
    }

    fn worked_monday(app: &App) {
        let entry = Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap();
        let exit = Utc.with_ymd_and_hms(2025, 3, 10, 17, 0, 0).unwrap();
        app.week
            .update_day(Day::new("Monday", Schedule::new(Some(entry), Some(exit))))
            .unwrap();
    }

    #[test]
    fn week_lists_every_day_with_flags() {
        let app = app(Locale::En);
        worked_monday(&app);
        app.week
            .update_day(Day::with_flags("Tuesday", Schedule::empty(), true, false))
            .unwrap();

        let mut output = Vec::new();
        run(&mut output, &app, false).unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        Monday     08:00 - 17:00  09:00
        Tuesday    --:-- - --:--  --:--  [holiday]
        Wednesday  --:-- - --:--  --:--
        Thursday   --:-- - --:--  --:--
        Friday     --:-- - --:--  --:--
        Saturday   --:-- - --:--  --:--  [untracked]
        Sunday     --:-- - --:--  --:--  [untracked]
        Worked: 09:00
        ");
    }

    #[test]
    fn week_json_reports_minutes_and_trackable() {
        let app = app(Locale::En);
        worked_monday(&app);

        let json = format_week_json(&app.week.get_days(), Locale::En).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["locale"], "en");
        assert_eq!(value["worked_minutes"], 540.0);
        let monday = &value["days"][0];
        assert_eq!(monday["name"], "Monday");
        assert_eq!(monday["minutes"], 540.0);
        assert_eq!(monday["trackable"], true);
        assert_eq!(monday["schedule"]["entry"], "2025-03-10T08:00:00Z");
        let sunday = &value["days"][6];
        assert_eq!(sunday["trackable"], false);
        assert!(sunday["minutes"].is_null());
        assert!(sunday["schedule"]["exit"].is_null());
    }

    #[test]
    fn open_day_shows_missing_exit() {
        let app = app(Locale::Es);
        let entry = Utc.with_ymd_and_hms(2025, 3, 12, 9, 30, 0).unwrap();
        app.week
            .update_day(Day::new("Miércoles", Schedule::new(Some(entry), None)))
            .unwrap();

        let mut output = Vec::new();
        day(&mut output, &app, "Miércoles").unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @"Miércoles  09:30 - --:--  --:--");
    }

    #[test]
    fn unknown_day_is_rejected() {
        let app = app(Locale::En);
        let mut output = Vec::new();
        let err = day(&mut output, &app, "monday").unwrap_err();
        assert_eq!(err.to_string(), "Invalid day provided: \"monday\".");
    }

    #[test]
    fn trackable_skips_weekend() {
        let app = app(Locale::Es);
        let mut output = Vec::new();
        trackable(&mut output, &app).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.lines().count(), 5);
        assert!(output.starts_with("Lunes"));
        assert!(!output.contains("Sábado"));
    }

    #[test]
    fn reset_discards_schedules() {
        let app = app(Locale::En);
        worked_monday(&app);

        let mut output = Vec::new();
        reset(&mut output, &app).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("Week reset.\nMonday     --:-- - --:--  --:--\n"));
        assert!(output.ends_with("Worked: 00:00\n"));
        assert!(app.week.day("Monday").unwrap().schedule.is_empty());
    }
}
