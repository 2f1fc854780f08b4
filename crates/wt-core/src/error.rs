//! Error types for day validation and store operations.

use std::fmt;

use thiserror::Error;

use crate::locale::Locale;

/// What went wrong with a day name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayErrorKind {
    /// The name is not one of the locale's canonical day names.
    Invalid,
    /// An update targeted a day absent from the current week.
    NotFound,
    /// Conflicting data for a day. Not raised by any store operation yet.
    Conflict,
}

impl DayErrorKind {
    /// Stable tag for programmatic matching.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
        }
    }
}

impl fmt::Display for DayErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A day-name error carrying a message worded for the active locale.
///
/// The message is chosen once at construction, so displaying the error never
/// depends on global state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DayError {
    kind: DayErrorKind,
    day: String,
    locale: Locale,
    message: String,
}

impl DayError {
    fn new(kind: DayErrorKind, day: impl Into<String>, locale: Locale) -> Self {
        let day = day.into();
        let message = match (kind, locale) {
            (DayErrorKind::Invalid, Locale::En) => format!("Invalid day provided: \"{day}\"."),
            (DayErrorKind::Invalid, Locale::Es) => format!("Día inválido: \"{day}\"."),
            (DayErrorKind::NotFound, Locale::En) => format!("Day not found: \"{day}\"."),
            (DayErrorKind::NotFound, Locale::Es) => format!("No se encontró el día: \"{day}\"."),
            (DayErrorKind::Conflict, Locale::En) => {
                format!("Conflicting data for day \"{day}\".")
            }
            (DayErrorKind::Conflict, Locale::Es) => {
                format!("Datos en conflicto para el día \"{day}\".")
            }
        };
        Self {
            kind,
            day,
            locale,
            message,
        }
    }

    pub fn invalid(day: impl Into<String>, locale: Locale) -> Self {
        Self::new(DayErrorKind::Invalid, day, locale)
    }

    pub fn not_found(day: impl Into<String>, locale: Locale) -> Self {
        Self::new(DayErrorKind::NotFound, day, locale)
    }

    pub fn conflict(day: impl Into<String>, locale: Locale) -> Self {
        Self::new(DayErrorKind::Conflict, day, locale)
    }

    #[must_use]
    pub const fn kind(&self) -> DayErrorKind {
        self.kind
    }

    #[must_use]
    pub fn is_kind(&self, kind: DayErrorKind) -> bool {
        self.kind == kind
    }

    /// The offending day name.
    #[must_use]
    pub fn day(&self) -> &str {
        &self.day
    }

    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure reported by a [`KeyValueStore`](crate::storage::KeyValueStore) backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not read a key.
    #[error("failed to read key {key}")]
    Read {
        key: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The backend could not write or remove a key.
    #[error("failed to write key {key}")]
    Write {
        key: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Errors from the week and workday stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A day name failed validation or lookup.
    #[error(transparent)]
    Day(#[from] DayError),
    /// The persistence backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Stored data was not valid JSON, or a value could not be serialized.
    #[error("invalid stored JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The stored week decoded to something other than a JSON array.
    #[error("invalid data format for days, expected an array")]
    MalformedWeek,
}

impl StoreError {
    /// Returns the day error, if this is one.
    #[must_use]
    pub const fn as_day_error(&self) -> Option<&DayError> {
        match self {
            Self::Day(err) => Some(err),
            _ => None,
        }
    }
}
