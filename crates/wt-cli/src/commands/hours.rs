//! Preferred workday length.

use std::io::Write;

use anyhow::Result;
use wt_core::{DEFAULT_WORKDAY_HOURS, VALID_WORKDAY_HOURS, is_valid_workday_hours};

use crate::App;
use crate::commands::util::format_hours;

pub fn show<W: Write>(writer: &mut W, app: &App) -> Result<()> {
    writeln!(writer, "Workday: {}", format_hours(app.prefs.get_workday_hours()))?;
    Ok(())
}

/// Stores `hours` as the workday length.
///
/// Values outside the allowed set are stored as given, but are replaced by
/// the default the next time the preference is loaded.
pub fn set<W: Write>(writer: &mut W, app: &App, hours: f64) -> Result<()> {
    app.prefs.set_workday_hours(hours)?;
    writeln!(writer, "Workday set to {}", format_hours(hours))?;
    if !is_valid_workday_hours(hours) {
        let allowed: Vec<String> = VALID_WORKDAY_HOURS.iter().map(|h| format_hours(*h)).collect();
        writeln!(
            writer,
            "Note: {} is not one of {}; {} will be used from the next run",
            format_hours(hours),
            allowed.join(", "),
            format_hours(DEFAULT_WORKDAY_HOURS),
        )?;
    }
    Ok(())
}

pub fn reset<W: Write>(writer: &mut W, app: &App) -> Result<()> {
    app.prefs.reset_to_default()?;
    writeln!(writer, "Workday reset to {}", format_hours(app.prefs.get_workday_hours()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::rc::Rc;

    use chrono::FixedOffset;
    use insta::assert_snapshot;
    use wt_core::{KeyValueStore, Locale, MemoryStore, WORKDAY_HOURS_KEY};

    fn app(storage: Rc<MemoryStore>) -> App {
        App::with_storage(storage, Locale::En, false, FixedOffset::east_opt(0).unwrap()).unwrap()
    }

    #[test]
    fn show_defaults_to_seven_and_a_half() {
        let app = app(Rc::new(MemoryStore::new()));
        let mut output = Vec::new();
        show(&mut output, &app).unwrap();
        assert_snapshot!(String::from_utf8(output).unwrap(), @"Workday: 7.5h");
    }

    #[test]
    fn set_persists_allowed_value() {
        let storage = Rc::new(MemoryStore::new());
        let app = app(Rc::clone(&storage));

        let mut output = Vec::new();
        set(&mut output, &app, 8.0).unwrap();
        show(&mut output, &app).unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        Workday set to 8h
        Workday: 8h
        ");
        assert_eq!(storage.get(WORKDAY_HOURS_KEY).unwrap().as_deref(), Some("8"));
    }

    #[test]
    fn set_warns_about_disallowed_value() {
        let storage = Rc::new(MemoryStore::new());
        let app = app(Rc::clone(&storage));

        let mut output = Vec::new();
        set(&mut output, &app, 6.0).unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        Workday set to 6h
        Note: 6h is not one of 7.5h, 8h; 7.5h will be used from the next run
        ");

        let reopened = self::app(storage);
        let mut output = Vec::new();
        show(&mut output, &reopened).unwrap();
        assert_snapshot!(String::from_utf8(output).unwrap(), @"Workday: 7.5h");
    }

    #[test]
    fn reset_restores_default() {
        let app = app(Rc::new(MemoryStore::new()));
        let mut output = Vec::new();
        set(&mut output, &app, 8.0).unwrap();

        let mut output = Vec::new();
        reset(&mut output, &app).unwrap();
        assert_snapshot!(String::from_utf8(output).unwrap(), @"Workday reset to 7.5h");
    }
}
