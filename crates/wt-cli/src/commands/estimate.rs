//! Estimated exit for a hypothetical clock-in.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use wt_core::estimate_exit_for;

use crate::App;
use crate::commands::util::{format_minutes, format_time};

/// Prints when `day` would end if it started at `clock_in`. Nothing is stored.
pub fn run<W: Write>(
    writer: &mut W,
    app: &App,
    day: &str,
    clock_in: DateTime<Utc>,
    consider_accumulated: bool,
) -> Result<()> {
    let hours = app.prefs.get_workday_hours();
    if consider_accumulated {
        let accumulated = app.week.accumulated_time(day)?;
        writeln!(writer, "Accumulated: {}", format_minutes(accumulated * 60.0))?;
    } else {
        app.week.day(day)?;
    }

    let exit = estimate_exit_for(&app.week, day, Some(clock_in), hours, consider_accumulated);
    if let Some(exit) = exit {
        writeln!(writer, "Estimated exit: {}", format_time(exit, app.offset))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::rc::Rc;

    use chrono::{FixedOffset, TimeZone};
    use insta::assert_snapshot;
    use wt_core::{Day, Locale, MemoryStore, Schedule};

    fn app() -> App {
        App::with_storage(
            Rc::new(MemoryStore::new()),
            Locale::Es,
            false,
            FixedOffset::east_opt(0).unwrap(),
        )
        .unwrap()
    }

    fn at(day: u32, hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, hour, min, 0).unwrap()
    }

    #[test]
    fn plain_estimate_adds_workday() {
        let app = app();
        let mut output = Vec::new();
        run(&mut output, &app, "Lunes", at(10, 9, 0), false).unwrap();
        assert_snapshot!(String::from_utf8(output).unwrap(), @"Estimated exit: 16:30");
    }

    #[test]
    fn accumulated_estimate_counts_other_days() {
        let app = app();
        app.prefs.set_workday_hours(8.0).unwrap();
        app.week
            .update_day(Day::new(
                "Lunes",
                Schedule::new(Some(at(10, 8, 0)), Some(at(10, 7, 30))),
            ))
            .unwrap();

        let mut output = Vec::new();
        run(&mut output, &app, "Martes", at(11, 9, 0), true).unwrap();

        // Monday ran backwards by half an hour, which shortens Tuesday.
        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        Accumulated: -00:30
        Estimated exit: 16:30
        ");
    }

    #[test]
    fn estimate_does_not_store_anything() {
        let app = app();
        let mut output = Vec::new();
        run(&mut output, &app, "Jueves", at(13, 9, 0), false).unwrap();
        assert!(app.week.day("Jueves").unwrap().schedule.is_empty());
    }

    #[test]
    fn estimate_rejects_unknown_day() {
        let app = app();
        let mut output = Vec::new();
        let err = run(&mut output, &app, "Thursday", at(13, 9, 0), false).unwrap_err();
        assert_eq!(err.to_string(), "Día inválido: \"Thursday\".");
    }
}
