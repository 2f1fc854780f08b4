//! Clock-in/clock-out cycle for a single day.
//!
//! A [`TrackingSession`] moves `Idle → ClockedIn → ClockedOut`; `clear`
//! returns to `Idle` from any state. Each transition writes the day's schedule
//! back through [`WeekStore::update_day`]. Those writes are fire-and-forget: a
//! failure is logged and the session carries on, since the store is read
//! again on the next resume.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::error::DayError;
use crate::estimate::estimate_exit_for;
use crate::schedule::Schedule;
use crate::week::WeekStore;
use crate::workday::WorkdayPreferenceStore;

/// Transition not allowed from the current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("already clocked in on {day}")]
    AlreadyClockedIn { day: String },
    #[error("not clocked in on {day}")]
    NotClockedIn { day: String },
    #[error("already clocked out of {day}, clear it to start again")]
    AlreadyClockedOut { day: String },
}

/// Where a day's tracking cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    ClockedIn {
        entry: DateTime<Utc>,
        estimated_exit: Option<DateTime<Utc>>,
    },
    ClockedOut {
        entry: DateTime<Utc>,
        exit: DateTime<Utc>,
        estimated_exit: Option<DateTime<Utc>>,
    },
}

impl SessionState {
    #[must_use]
    pub const fn estimated_exit(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Idle => None,
            Self::ClockedIn { estimated_exit, .. } | Self::ClockedOut { estimated_exit, .. } => {
                *estimated_exit
            }
        }
    }

    #[must_use]
    pub const fn schedule(&self) -> Schedule {
        match *self {
            Self::Idle => Schedule::empty(),
            Self::ClockedIn { entry, .. } => Schedule::new(Some(entry), None),
            Self::ClockedOut { entry, exit, .. } => Schedule::new(Some(entry), Some(exit)),
        }
    }
}

/// Tracking cycle for one named day.
#[derive(Debug, Clone)]
pub struct TrackingSession {
    day: String,
    state: SessionState,
}

impl TrackingSession {
    /// Rebuilds the session for `day` from its stored schedule.
    ///
    /// An entry without an exit resumes as clocked in, with the estimate
    /// recomputed from the current preference. A lone exit is treated as idle.
    pub fn resume(
        week: &WeekStore,
        prefs: &WorkdayPreferenceStore,
        day: &str,
        consider_accumulated: bool,
    ) -> Result<Self, DayError> {
        let schedule = week.day(day)?.schedule;
        let estimate = |entry| {
            estimate_exit_for(
                week,
                day,
                Some(entry),
                prefs.get_workday_hours(),
                consider_accumulated,
            )
        };
        let state = match (schedule.entry, schedule.exit) {
            (Some(entry), None) => SessionState::ClockedIn {
                entry,
                estimated_exit: estimate(entry),
            },
            (Some(entry), Some(exit)) => SessionState::ClockedOut {
                entry,
                exit,
                estimated_exit: estimate(entry),
            },
            (None, _) => SessionState::Idle,
        };
        Ok(Self {
            day: day.to_string(),
            state,
        })
    }

    pub fn day(&self) -> &str {
        &self.day
    }

    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Records `now` as the entry and returns the estimated exit.
    pub fn clock_in(
        &mut self,
        week: &WeekStore,
        prefs: &WorkdayPreferenceStore,
        now: DateTime<Utc>,
        consider_accumulated: bool,
    ) -> Result<Option<DateTime<Utc>>, SessionError> {
        match self.state {
            SessionState::Idle => {}
            SessionState::ClockedIn { .. } => {
                return Err(SessionError::AlreadyClockedIn {
                    day: self.day.clone(),
                });
            }
            SessionState::ClockedOut { .. } => {
                return Err(SessionError::AlreadyClockedOut {
                    day: self.day.clone(),
                });
            }
        }

        let estimated_exit = estimate_exit_for(
            week,
            &self.day,
            Some(now),
            prefs.get_workday_hours(),
            consider_accumulated,
        );
        self.state = SessionState::ClockedIn {
            entry: now,
            estimated_exit,
        };
        tracing::info!(day = %self.day, entry = %now, ?estimated_exit, "clocked in");
        self.persist(week);
        Ok(estimated_exit)
    }

    /// Records `now` as the exit and returns the completed schedule.
    pub fn clock_out(
        &mut self,
        week: &WeekStore,
        now: DateTime<Utc>,
    ) -> Result<Schedule, SessionError> {
        let SessionState::ClockedIn {
            entry,
            estimated_exit,
        } = self.state
        else {
            return Err(SessionError::NotClockedIn {
                day: self.day.clone(),
            });
        };

        self.state = SessionState::ClockedOut {
            entry,
            exit: now,
            estimated_exit,
        };
        tracing::info!(day = %self.day, exit = %now, "clocked out");
        self.persist(week);
        Ok(self.state.schedule())
    }

    /// Discards both timestamps and the estimate.
    pub fn clear(&mut self, week: &WeekStore) {
        self.state = SessionState::Idle;
        tracing::info!(day = %self.day, "cleared day");
        self.persist(week);
    }

    fn persist(&self, week: &WeekStore) {
        let result = week
            .day(&self.day)
            .map_err(Into::into)
            .and_then(|day| week.update_day(day.with_schedule(self.state.schedule())));
        if let Err(e) = result {
            tracing::warn!(day = %self.day, error = %e, "failed to persist schedule");
        }
    }
}
