//! Supported locales and their static day-name tables.

use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

const EN_DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const ES_DAYS: [&str; 7] = [
    "Lunes",
    "Martes",
    "Miércoles",
    "Jueves",
    "Viernes",
    "Sábado",
    "Domingo",
];

/// A locale the tracker can validate day names and word errors in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    #[default]
    Es,
}

impl Locale {
    /// Reduces a host language tag (e.g. `en-US`, `en_GB.UTF-8`, `es-AR`) to a locale.
    ///
    /// Anything that does not start with `en` resolves to Spanish.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        if tag.trim().to_ascii_lowercase().starts_with("en") {
            Self::En
        } else {
            Self::Es
        }
    }

    /// Canonical day names, Monday first.
    #[must_use]
    pub const fn day_names(self) -> &'static [&'static str; 7] {
        match self {
            Self::En => &EN_DAYS,
            Self::Es => &ES_DAYS,
        }
    }

    /// Returns true if `name` is one of this locale's canonical day names.
    ///
    /// The comparison is exact: `monday` is not a valid English day.
    #[must_use]
    pub fn is_valid_day(self, name: &str) -> bool {
        self.day_names().contains(&name)
    }

    /// Canonical name for a calendar weekday.
    #[must_use]
    pub fn day_for(self, weekday: Weekday) -> &'static str {
        self.day_names()[weekday.num_days_from_monday() as usize]
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns true if `name` is a weekend day in any supported locale.
///
/// Case and accents are ignored, so `SABADO` and `sábado` both match.
pub(crate) fn is_weekend_name(name: &str) -> bool {
    let folded = fold(name);
    [Locale::En, Locale::Es]
        .iter()
        .flat_map(|locale| &locale.day_names()[5..])
        .any(|weekend| fold(weekend) == folded)
}

fn fold(s: &str) -> String {
    s.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_resolution() {
        assert_eq!(Locale::from_tag("en"), Locale::En);
        assert_eq!(Locale::from_tag("en-US"), Locale::En);
        assert_eq!(Locale::from_tag("en_GB.UTF-8"), Locale::En);
        assert_eq!(Locale::from_tag("EN"), Locale::En);
        assert_eq!(Locale::from_tag("es-AR"), Locale::Es);
        assert_eq!(Locale::from_tag("fr-FR"), Locale::Es);
        assert_eq!(Locale::from_tag(""), Locale::Es);
    }

    #[test]
    fn test_validation_is_exact() {
        assert!(Locale::En.is_valid_day("Monday"));
        assert!(!Locale::En.is_valid_day("monday"));
        assert!(!Locale::En.is_valid_day("Lunes"));
        assert!(Locale::Es.is_valid_day("Miércoles"));
        assert!(!Locale::Es.is_valid_day("Miercoles"));
        assert!(!Locale::Es.is_valid_day("Funday"));
    }

    #[test]
    fn test_day_for_weekday() {
        assert_eq!(Locale::En.day_for(Weekday::Mon), "Monday");
        assert_eq!(Locale::En.day_for(Weekday::Sun), "Sunday");
        assert_eq!(Locale::Es.day_for(Weekday::Sat), "Sábado");
    }

    #[test]
    fn test_weekend_names_ignore_case_and_accents() {
        for name in ["Saturday", "sunday", "Sábado", "SABADO", "domingo"] {
            assert!(is_weekend_name(name), "{name} should be weekend");
        }
        for name in ["Monday", "Viernes", "Miércoles"] {
            assert!(!is_weekend_name(name), "{name} should not be weekend");
        }
    }
}
