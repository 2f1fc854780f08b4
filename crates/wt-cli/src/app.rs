//! Wiring between configuration, storage and the core stores.

use std::rc::Rc;

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, FixedOffset, Utc};
use wt_core::{KeyValueStore, Locale, WeekStore, WorkdayPreferenceStore};
use wt_db::Database;

use crate::Config;

/// The stores a command works against, plus how to present times.
pub struct App {
    pub week: WeekStore,
    pub prefs: WorkdayPreferenceStore,
    /// Default for the accumulated-time estimate flag.
    pub consider_accumulated: bool,
    /// Offset used to read and print wall-clock times.
    pub offset: FixedOffset,
}

impl App {
    /// Opens the database named in `config`, creating its directory if needed.
    pub fn open(config: &Config, offset: FixedOffset) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent).context("failed to create database directory")?;
        }
        let db = Database::open(&config.database_path).with_context(|| {
            format!("failed to open {}", config.database_path.display())
        })?;
        Self::with_storage(
            Rc::new(db),
            config.locale(),
            config.consider_accumulated,
            offset,
        )
    }

    pub fn with_storage(
        storage: Rc<dyn KeyValueStore>,
        locale: Locale,
        consider_accumulated: bool,
        offset: FixedOffset,
    ) -> Result<Self> {
        let week = WeekStore::open(Rc::clone(&storage), locale).context("failed to load week")?;
        let prefs =
            WorkdayPreferenceStore::open(storage).context("failed to load workday hours")?;
        Ok(Self {
            week,
            prefs,
            consider_accumulated,
            offset,
        })
    }

    /// Canonical name of the weekday `now` falls on.
    pub fn today(&self, now: DateTime<Utc>) -> &'static str {
        let weekday = now.with_timezone(&self.offset).weekday();
        self.week.locale().day_for(weekday)
    }

    /// The given day name, or today's.
    pub fn day_or_today(&self, day: Option<&str>, now: DateTime<Utc>) -> String {
        day.map_or_else(|| self.today(now).to_string(), str::to_string)
    }
}
