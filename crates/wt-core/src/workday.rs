//! Preferred workday length.

use std::rc::Rc;

use crate::error::StoreError;
use crate::observable::{Observable, Subscription};
use crate::storage::{KeyValueStore, WORKDAY_HOURS_KEY};

/// Workday lengths, in hours, accepted when loading the preference.
pub const VALID_WORKDAY_HOURS: [f64; 2] = [7.5, 8.0];

/// Workday length used when nothing valid is stored.
pub const DEFAULT_WORKDAY_HOURS: f64 = 7.5;

/// Returns true if `hours` is one of [`VALID_WORKDAY_HOURS`].
pub fn is_valid_workday_hours(hours: f64) -> bool {
    VALID_WORKDAY_HOURS
        .iter()
        .any(|valid| (valid - hours).abs() < f64::EPSILON)
}

/// Owns the preferred workday length.
///
/// The stored value is checked against [`VALID_WORKDAY_HOURS`] on load only;
/// [`set_workday_hours`](Self::set_workday_hours) stores whatever it is given.
pub struct WorkdayPreferenceStore {
    storage: Rc<dyn KeyValueStore>,
    hours: Observable<f64>,
}

impl WorkdayPreferenceStore {
    /// Loads the preference, falling back to [`DEFAULT_WORKDAY_HOURS`] when
    /// the stored value is missing, not a number or not allowed.
    pub fn open(storage: Rc<dyn KeyValueStore>) -> Result<Self, StoreError> {
        let stored = storage.get(WORKDAY_HOURS_KEY)?;
        let hours = match stored.as_deref().map(|s| s.trim().parse::<f64>()) {
            Some(Ok(hours)) if is_valid_workday_hours(hours) => hours,
            Some(Ok(hours)) => {
                tracing::warn!(hours, "stored workday hours not allowed, using default");
                DEFAULT_WORKDAY_HOURS
            }
            Some(Err(e)) => {
                tracing::warn!(error = %e, "stored workday hours not a number, using default");
                DEFAULT_WORKDAY_HOURS
            }
            None => DEFAULT_WORKDAY_HOURS,
        };
        tracing::debug!(hours, "loaded workday hours");

        Ok(Self {
            storage,
            hours: Observable::new(hours),
        })
    }

    pub fn get_workday_hours(&self) -> f64 {
        self.hours.get()
    }

    /// Persists `hours` and notifies subscribers.
    pub fn set_workday_hours(&self, hours: f64) -> Result<(), StoreError> {
        self.storage.set(WORKDAY_HOURS_KEY, &hours.to_string())?;
        tracing::debug!(hours, "persisted workday hours");
        self.hours.set(hours);
        Ok(())
    }

    pub fn reset_to_default(&self) -> Result<(), StoreError> {
        self.set_workday_hours(DEFAULT_WORKDAY_HOURS)
    }

    /// Subscribes to the preference. The current value is delivered at once.
    pub fn subscribe(&self, mut on_hours: impl FnMut(f64) + 'static) -> Subscription {
        self.hours.subscribe(move |hours: &f64| on_hours(*hours))
    }
}

#[cfg(test)]
#[expect(
    clippy::float_cmp,
    reason = "allowed workday lengths are exact in f64"
)]
mod tests {
    use super::*;

    use std::cell::RefCell;

    use crate::storage::MemoryStore;

    fn open_with(stored: Option<&str>) -> (Rc<MemoryStore>, WorkdayPreferenceStore) {
        let storage = Rc::new(match stored {
            Some(value) => MemoryStore::with_entries([(WORKDAY_HOURS_KEY, value)]),
            None => MemoryStore::new(),
        });
        let prefs = WorkdayPreferenceStore::open(storage.clone()).unwrap();
        (storage, prefs)
    }

    fn stored(storage: &MemoryStore) -> Option<String> {
        storage.get(WORKDAY_HOURS_KEY).unwrap()
    }

    #[test]
    fn test_missing_value_uses_default() {
        let (storage, prefs) = open_with(None);
        assert_eq!(prefs.get_workday_hours(), DEFAULT_WORKDAY_HOURS);
        assert_eq!(stored(&storage), None);
    }

    #[test]
    fn test_valid_stored_values_load() {
        assert_eq!(open_with(Some("8")).1.get_workday_hours(), 8.0);
        assert_eq!(open_with(Some("7.5")).1.get_workday_hours(), 7.5);
        assert_eq!(open_with(Some(" 8.0 ")).1.get_workday_hours(), 8.0);
    }

    #[test]
    fn test_invalid_stored_values_use_default() {
        for value in ["999", "6", "", "eight", "NaN"] {
            assert_eq!(
                open_with(Some(value)).1.get_workday_hours(),
                DEFAULT_WORKDAY_HOURS,
                "stored {value:?}"
            );
        }
    }

    #[test]
    fn test_set_persists_decimal_string() {
        let (storage, prefs) = open_with(None);
        prefs.set_workday_hours(8.0).unwrap();
        assert_eq!(prefs.get_workday_hours(), 8.0);
        assert_eq!(stored(&storage).as_deref(), Some("8"));

        prefs.set_workday_hours(7.5).unwrap();
        assert_eq!(stored(&storage).as_deref(), Some("7.5"));
    }

    #[test]
    fn test_set_accepts_values_outside_allow_list() {
        let (storage, prefs) = open_with(None);
        prefs.set_workday_hours(6.0).unwrap();
        assert_eq!(prefs.get_workday_hours(), 6.0);
        assert_eq!(stored(&storage).as_deref(), Some("6"));

        let reopened = WorkdayPreferenceStore::open(storage).unwrap();
        assert_eq!(reopened.get_workday_hours(), DEFAULT_WORKDAY_HOURS);
    }

    #[test]
    fn test_subscribers_see_current_and_new_values() {
        let (_, prefs) = open_with(None);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = prefs.subscribe(move |hours| sink.borrow_mut().push(hours));

        prefs.set_workday_hours(8.0).unwrap();
        assert_eq!(*seen.borrow(), vec![7.5, 8.0]);
    }

    #[test]
    fn test_reset_restores_and_persists_default() {
        let (storage, prefs) = open_with(Some("8"));
        prefs.reset_to_default().unwrap();
        assert_eq!(prefs.get_workday_hours(), DEFAULT_WORKDAY_HOURS);
        assert_eq!(stored(&storage).as_deref(), Some("7.5"));
    }

    #[test]
    fn test_allow_list_membership() {
        assert!(is_valid_workday_hours(7.5));
        assert!(is_valid_workday_hours(8.0));
        assert!(!is_valid_workday_hours(7.0));
        assert!(!is_valid_workday_hours(f64::NAN));
    }
}
