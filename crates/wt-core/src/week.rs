//! The authoritative weekly day collection.
//!
//! [`WeekStore`] is the single writer of the week. Every mutation goes through
//! [`WeekStore::set_days`], which validates names, persists the collection
//! under [`WEEK_KEY`] and then notifies subscribers.
//!
//! # Storage Format
//!
//! The week is stored as a JSON array of days:
//!
//! ```json
//! [{"name": "Monday", "schedule": {"entry": "2025-03-10T08:00:00Z", "exit": null},
//!   "holiday": false, "license": false}]
//! ```
//!
//! `trackable` is not stored; it is recomputed from the name when the week is
//! loaded. Elements with a missing or non-canonical name, and repeats of a
//! name already read, are dropped on load without raising an error. Other
//! unreadable fields fall back to empty values. A payload that is not a JSON
//! array is fatal.

use std::collections::HashSet;
use std::rc::Rc;

use crate::day::{Day, StoredDay};
use crate::error::{DayError, StoreError};
use crate::locale::Locale;
use crate::observable::{Observable, Subscription};
use crate::storage::{KeyValueStore, WEEK_KEY};

/// Owns the current week and keeps it in sync with storage.
pub struct WeekStore {
    storage: Rc<dyn KeyValueStore>,
    locale: Locale,
    days: Observable<Vec<Day>>,
}

impl WeekStore {
    /// Loads the week from `storage`, or starts from the default week if none
    /// is stored.
    ///
    /// The loaded week is not written back until the next [`set_days`](Self::set_days).
    pub fn open(storage: Rc<dyn KeyValueStore>, locale: Locale) -> Result<Self, StoreError> {
        let days = match storage.get(WEEK_KEY)? {
            Some(raw) => revive_week(&raw, locale)?,
            None => {
                tracing::debug!(%locale, "no stored week, using default week");
                default_week(locale)
            }
        };
        tracing::debug!(%locale, day_count = days.len(), "loaded week");

        Ok(Self {
            storage,
            locale,
            days: Observable::new(days),
        })
    }

    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    fn validate(&self, name: &str) -> Result<(), DayError> {
        if self.locale.is_valid_day(name) {
            Ok(())
        } else {
            Err(DayError::invalid(name, self.locale))
        }
    }

    /// Returns a copy of the current week.
    pub fn get_days(&self) -> Vec<Day> {
        self.days.get()
    }

    /// Replaces the week.
    ///
    /// Fails with an `invalid` [`DayError`] before touching storage if any
    /// name is not canonical for the store's locale or appears twice.
    pub fn set_days(&self, days: Vec<Day>) -> Result<(), StoreError> {
        if let Some(invalid) = days.iter().find(|d| !self.locale.is_valid_day(&d.name)) {
            return Err(DayError::invalid(invalid.name.clone(), self.locale).into());
        }
        if let Some(repeated) = first_repeated(&days) {
            return Err(DayError::invalid(repeated, self.locale).into());
        }

        let json = serde_json::to_string(&days)?;
        self.storage.set(WEEK_KEY, &json)?;
        tracing::debug!(day_count = days.len(), "persisted week");

        self.days.set(days);
        Ok(())
    }

    /// Deletes the stored week. The in-memory week is left as is.
    pub fn clear_days(&self) -> Result<(), StoreError> {
        self.storage.remove(WEEK_KEY)?;
        tracing::debug!("cleared stored week");
        Ok(())
    }

    /// Subscribes to the whole week. The current week is delivered at once.
    pub fn subscribe(&self, mut on_days: impl FnMut(&[Day]) + 'static) -> Subscription {
        self.days.subscribe(move |days: &Vec<Day>| on_days(days))
    }

    /// Returns the named day, or a fresh empty day if the week lacks it.
    ///
    /// The fallback day is not persisted.
    pub fn day(&self, name: &str) -> Result<Day, DayError> {
        self.validate(name)?;
        Ok(find_or_empty(&self.days.get(), name))
    }

    /// Watches one day.
    ///
    /// `on_day` receives the named day on every change of the week, or a
    /// synthesized empty day while the week lacks it.
    pub fn get_day_by_id(
        &self,
        name: &str,
        mut on_day: impl FnMut(&Day) + 'static,
    ) -> Result<Subscription, DayError> {
        self.validate(name)?;
        let name = name.to_string();
        Ok(self
            .days
            .subscribe(move |days: &Vec<Day>| on_day(&find_or_empty(days, &name))))
    }

    /// Replaces the day with the same name, leaving every other day untouched.
    ///
    /// The lookup runs against the latest week, so back-to-back updates never
    /// work from a stale copy.
    pub fn update_day(&self, day: Day) -> Result<Day, StoreError> {
        self.validate(&day.name)?;

        let mut days = self.days.get();
        let Some(slot) = days.iter_mut().find(|d| d.name == day.name) else {
            return Err(DayError::not_found(day.name, self.locale).into());
        };
        *slot = day.clone();

        self.set_days(days)?;
        tracing::debug!(day = %day.name, "updated day");
        Ok(day)
    }

    /// Days that take part in tracking.
    pub fn trackable_days(&self) -> Vec<Day> {
        trackable(&self.days.get())
    }

    /// Watches the trackable projection of the week.
    pub fn get_trackable_days(
        &self,
        mut on_days: impl FnMut(&[Day]) + 'static,
    ) -> Subscription {
        self.days
            .subscribe(move |days: &Vec<Day>| on_days(&trackable(days)))
    }

    /// Replaces the week with the default week and returns it.
    pub fn reset_to_default_week(&self) -> Result<Vec<Day>, StoreError> {
        let week = default_week(self.locale);
        self.set_days(week.clone())?;
        tracing::info!(locale = %self.locale, "reset week to default");
        Ok(week)
    }

    /// Hours worked on the other trackable days of the week.
    ///
    /// Sums the signed duration of every trackable day except `name`. Days
    /// without both timestamps count as zero. `name` must be canonical but
    /// does not have to be in the week.
    pub fn accumulated_time(&self, name: &str) -> Result<f64, DayError> {
        self.validate(name)?;
        Ok(accumulated_hours(&self.days.get(), name))
    }

    /// Watches [`accumulated_time`](Self::accumulated_time) for `name`.
    pub fn get_accumulated_time(
        &self,
        name: &str,
        mut on_hours: impl FnMut(f64) + 'static,
    ) -> Result<Subscription, DayError> {
        self.validate(name)?;
        let name = name.to_string();
        Ok(self
            .days
            .subscribe(move |days: &Vec<Day>| on_hours(accumulated_hours(days, &name))))
    }
}

/// The seven canonical days, Monday first, each with an empty schedule.
pub fn default_week(locale: Locale) -> Vec<Day> {
    locale.day_names().iter().map(|name| Day::empty(*name)).collect()
}

fn find_or_empty(days: &[Day], name: &str) -> Day {
    days.iter()
        .find(|d| d.name == name)
        .cloned()
        .unwrap_or_else(|| Day::empty(name))
}

fn first_repeated(days: &[Day]) -> Option<String> {
    let mut seen = HashSet::new();
    days.iter()
        .find(|d| !seen.insert(d.name.as_str()))
        .map(|d| d.name.clone())
}

fn trackable(days: &[Day]) -> Vec<Day> {
    days.iter().filter(|d| d.trackable).cloned().collect()
}

fn accumulated_hours(days: &[Day], name: &str) -> f64 {
    days.iter()
        .filter(|d| d.trackable && d.name != name)
        .map(|d| d.schedule.duration_hours())
        .sum()
}

fn revive_week(raw: &str, locale: Locale) -> Result<Vec<Day>, StoreError> {
    let serde_json::Value::Array(items) = serde_json::from_str::<serde_json::Value>(raw)? else {
        return Err(StoreError::MalformedWeek);
    };

    let mut days = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let stored: StoredDay = match serde_json::from_value(item) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping malformed stored day");
                continue;
            }
        };
        match stored.into_day() {
            Some(day) if days.iter().any(|d: &Day| d.name == day.name) => {
                tracing::warn!(index, name = %day.name, "skipping repeated stored day");
            }
            Some(day) if locale.is_valid_day(&day.name) => days.push(day),
            Some(day) => {
                tracing::warn!(index, name = %day.name, %locale, "skipping stored day with unknown name");
            }
            None => tracing::warn!(index, "skipping stored day without a name"),
        }
    }
    Ok(days)
}
