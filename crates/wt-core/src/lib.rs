//! Core domain logic for the workweek tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - The week: canonical day names, per-day schedules and their persistence
//! - The workday preference: how long a workday should last
//! - Estimation: when the current workday should end
//!
//! Both stores persist through an injected [`KeyValueStore`] and expose their
//! state as replay-one [`Observable`] values.

pub mod day;
pub mod error;
pub mod estimate;
pub mod locale;
pub mod observable;
pub mod schedule;
pub mod session;
pub mod storage;
pub mod week;
pub mod workday;

pub use day::Day;
pub use error::{DayError, DayErrorKind, StorageError, StoreError};
pub use estimate::{estimate_exit, estimate_exit_for};
pub use locale::Locale;
pub use observable::{Observable, Subscription};
pub use schedule::Schedule;
pub use session::{SessionError, SessionState, TrackingSession};
pub use storage::{KeyValueStore, MemoryStore, WEEK_KEY, WORKDAY_HOURS_KEY};
pub use week::{WeekStore, default_week};
pub use workday::{
    DEFAULT_WORKDAY_HOURS, VALID_WORKDAY_HOURS, WorkdayPreferenceStore, is_valid_workday_hours,
};
