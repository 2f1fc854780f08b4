//! Named weekday slots.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::locale::is_weekend_name;
use crate::schedule::Schedule;

/// One weekday in the tracked week.
///
/// The store guarantees names are canonical and unique; the entity itself
/// accepts any name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Day {
    pub name: String,
    pub schedule: Schedule,
    pub holiday: bool,
    pub license: bool,
    /// Whether the day takes part in time tracking. Recomputed from the name
    /// on every load, so it is never persisted.
    #[serde(skip)]
    pub trackable: bool,
}

impl Day {
    /// Creates a working day with the given schedule.
    ///
    /// Weekend names start out non-trackable.
    pub fn new(name: impl Into<String>, schedule: Schedule) -> Self {
        Self::with_flags(name, schedule, false, false)
    }

    /// Creates a day with an empty schedule.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Schedule::empty())
    }

    pub fn with_flags(
        name: impl Into<String>,
        schedule: Schedule,
        holiday: bool,
        license: bool,
    ) -> Self {
        let name = name.into();
        let trackable = !is_weekend_name(&name);
        Self {
            name,
            schedule,
            holiday,
            license,
            trackable,
        }
    }

    /// Returns a copy of this day with `schedule` swapped in.
    #[must_use]
    pub fn with_schedule(&self, schedule: Schedule) -> Self {
        Self {
            schedule,
            ..self.clone()
        }
    }
}

/// Persisted shape of a day, read leniently.
///
/// Every field is optional and a field of the wrong type reads as absent, so
/// one corrupt value never costs the whole day; callers decide what to drop.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct StoredDay {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub schedule: Option<StoredSchedule>,
    #[serde(default, deserialize_with = "lenient")]
    pub holiday: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub license: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StoredSchedule {
    #[serde(default, deserialize_with = "lenient")]
    pub entry: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient")]
    pub exit: Option<DateTime<Utc>>,
}

/// Reads a field as `None` when it is null or does not fit `T`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match serde_json::from_value(value) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::debug!(error = %e, "ignoring unreadable stored field");
            Ok(None)
        }
    }
}

impl StoredDay {
    /// Rebuilds the entity, recomputing `trackable` from the name.
    ///
    /// Returns `None` when the name is missing or empty.
    pub fn into_day(self) -> Option<Day> {
        let name = self.name.filter(|n| !n.is_empty())?;
        let schedule = self
            .schedule
            .map_or_else(Schedule::empty, |s| Schedule::new(s.entry, s.exit));
        Some(Day::with_flags(
            name,
            schedule,
            self.holiday.unwrap_or(false),
            self.license.unwrap_or(false),
        ))
    }
}
