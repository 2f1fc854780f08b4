//! Estimated end of the workday.

use chrono::{DateTime, Duration, Utc};

use crate::week::WeekStore;

/// Largest offset, in milliseconds, an estimate may add. Well inside both the
/// `i64` range and chrono's representable dates.
const MAX_OFFSET_MS: f64 = 9.0e15;

/// Converts fractional hours to a duration, rounded to the millisecond.
///
/// Returns `None` for non-finite or out-of-range input.
#[expect(
    clippy::cast_possible_truncation,
    reason = "the value is bounded by MAX_OFFSET_MS before the cast"
)]
fn hours(hours: f64) -> Option<Duration> {
    let ms = (hours * 3_600_000.0).round();
    if !ms.is_finite() || ms.abs() > MAX_OFFSET_MS {
        return None;
    }
    Duration::try_milliseconds(ms as i64)
}

/// Clock-in plus the preferred workday length, plus `accumulated` hours when
/// given.
///
/// Returns `None` when there is no clock-in, or when the sum does not land on
/// a representable time.
pub fn estimate_exit(
    clock_in: Option<DateTime<Utc>>,
    preferred_hours: f64,
    accumulated: Option<f64>,
) -> Option<DateTime<Utc>> {
    let clock_in = clock_in?;
    let offset = hours(preferred_hours + accumulated.unwrap_or(0.0));
    let exit = offset.and_then(|offset| clock_in.checked_add_signed(offset));
    if exit.is_none() {
        tracing::warn!(preferred_hours, ?accumulated, "estimated exit out of range");
    }
    exit
}

/// Estimates the exit for `day_name`, optionally folding in the hours from
/// the rest of the week.
///
/// A failed accumulated-time lookup is logged and the estimate falls back to
/// the plain workday length.
pub fn estimate_exit_for(
    week: &WeekStore,
    day_name: &str,
    clock_in: Option<DateTime<Utc>>,
    preferred_hours: f64,
    consider_accumulated: bool,
) -> Option<DateTime<Utc>> {
    let clock_in = clock_in?;
    let accumulated = if consider_accumulated {
        match week.accumulated_time(day_name) {
            Ok(hours) => Some(hours),
            Err(e) => {
                tracing::warn!(day = day_name, error = %e, "accumulated time unavailable, ignoring it");
                None
            }
        }
    } else {
        None
    };
    estimate_exit(Some(clock_in), preferred_hours, accumulated)
}
