//! Clock-in/clock-out pairs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An entry/exit timestamp pair for one day.
///
/// Either side may be missing. Schedules are replaced wholesale, never edited
/// in place by the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Clock-in time.
    pub entry: Option<DateTime<Utc>>,
    /// Clock-out time.
    pub exit: Option<DateTime<Utc>>,
}

impl Schedule {
    #[must_use]
    pub const fn new(entry: Option<DateTime<Utc>>, exit: Option<DateTime<Utc>>) -> Self {
        Self { entry, exit }
    }

    /// A schedule with neither side recorded.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entry: None,
            exit: None,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entry.is_none() && self.exit.is_none()
    }

    /// Minutes between entry and exit, or 0 if either is missing.
    ///
    /// Negative when exit precedes entry; the value is not clamped.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "millisecond spans of a workday fit well within f64 precision"
    )]
    pub fn duration(&self) -> f64 {
        match (self.entry, self.exit) {
            (Some(entry), Some(exit)) => (exit - entry).num_milliseconds() as f64 / 60_000.0,
            _ => 0.0,
        }
    }

    /// Same as [`duration`](Self::duration), in hours.
    #[must_use]
    pub fn duration_hours(&self) -> f64 {
        self.duration() / 60.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, h, m, 0).unwrap()
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "whole minutes are exact in f64")]
    fn test_duration_in_minutes() {
        let schedule = Schedule::new(Some(at(8, 0)), Some(at(17, 0)));
        assert_eq!(schedule.duration(), 540.0);
        assert_eq!(schedule.duration_hours(), 9.0);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "zero is exact")]
    fn test_missing_side_is_zero() {
        assert_eq!(Schedule::empty().duration(), 0.0);
        assert_eq!(Schedule::new(Some(at(8, 0)), None).duration(), 0.0);
        assert_eq!(Schedule::new(None, Some(at(17, 0))).duration(), 0.0);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "whole minutes are exact in f64")]
    fn test_exit_before_entry_is_negative() {
        let schedule = Schedule::new(Some(at(17, 0)), Some(at(16, 30)));
        assert_eq!(schedule.duration(), -30.0);
    }

    #[test]
    fn test_serializes_missing_sides_as_null() {
        let json = serde_json::to_value(Schedule::new(Some(at(8, 0)), None)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "entry": "2025-03-10T08:00:00Z", "exit": null })
        );
    }
}
