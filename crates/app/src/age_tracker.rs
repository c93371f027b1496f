//! Age tracker: shared "seconds since this value last updated" per label.
//!
//! Widgets declare the labels they track when they are installed; handlers
//! then overwrite the entry whenever their source appears in a snapshot.
//! There is no decay or expiry here. The staleness renderer reads the stored
//! age directly or asks for [`AgeTracker::current_age`].

use std::collections::BTreeMap;

use serde::Serialize;

use dex_domain::error::ValidationError;
use dex_domain::time::{Timestamp, now, seconds_between};

/// Last known age of one tracked value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AgeEntry {
    /// Seconds since the value was captured, as reported by its source.
    pub age_s: Option<f64>,
    /// When the entry was last written.
    #[serde(skip)]
    pub updated_at: Option<Timestamp>,
}

/// Label → [`AgeEntry`] map with last-write-wins semantics.
///
/// A label exists in the map if and only if some widget tracks it.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct AgeTracker {
    entries: BTreeMap<String, AgeEntry>,
}

impl AgeTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `label` as tracked with an unknown age.
    ///
    /// Returns `false` if it was already tracked (the entry is left untouched).
    pub fn track(&mut self, label: impl Into<String>) -> bool {
        let label = label.into();
        if self.entries.contains_key(&label) {
            return false;
        }
        self.entries.insert(label, AgeEntry::default());
        true
    }

    /// Overwrite the age of `label`, stamping the current time.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UntrackedAge`] if no widget tracks `label`.
    pub fn touch(&mut self, label: &str, age_s: Option<f64>) -> Result<(), ValidationError> {
        self.touch_at(label, age_s, now())
    }

    /// Like [`touch`](Self::touch) with an explicit update time.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UntrackedAge`] if no widget tracks `label`.
    pub fn touch_at(
        &mut self,
        label: &str,
        age_s: Option<f64>,
        at: Timestamp,
    ) -> Result<(), ValidationError> {
        let entry = self
            .entries
            .get_mut(label)
            .ok_or_else(|| ValidationError::UntrackedAge(label.to_string()))?;
        *entry = AgeEntry {
            age_s,
            updated_at: Some(at),
        };
        Ok(())
    }

    #[must_use]
    pub fn get(&self, label: &str) -> Option<&AgeEntry> {
        self.entries.get(label)
    }

    /// The stored age of `label`, if tracked and known.
    #[must_use]
    pub fn age_s(&self, label: &str) -> Option<f64> {
        self.entries.get(label).and_then(|entry| entry.age_s)
    }

    /// Stored age plus the time elapsed since it was written.
    #[must_use]
    pub fn current_age(&self, label: &str, at: Timestamp) -> Option<f64> {
        let entry = self.entries.get(label)?;
        let age = entry.age_s?;
        let elapsed = entry
            .updated_at
            .map_or(0.0, |updated| seconds_between(updated, at));
        Some(age + elapsed)
    }

    #[must_use]
    pub fn is_tracked(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn should_start_with_unknown_age_when_tracked() {
        let mut ages = AgeTracker::new();
        assert!(ages.track("hmt310_age"));
        assert!(ages.is_tracked("hmt310_age"));
        assert_eq!(ages.age_s("hmt310_age"), None);
    }

    #[test]
    fn should_not_reset_entry_when_tracked_twice() {
        let mut ages = AgeTracker::new();
        ages.track("hmt310_age");
        ages.touch("hmt310_age", Some(2.0)).unwrap();
        assert!(!ages.track("hmt310_age"));
        assert_eq!(ages.age_s("hmt310_age"), Some(2.0));
    }

    #[test]
    fn should_overwrite_with_last_write() {
        let mut ages = AgeTracker::new();
        ages.track("novatel_age");
        ages.touch("novatel_age", Some(5.0)).unwrap();
        ages.touch("novatel_age", Some(0.5)).unwrap();
        assert_eq!(ages.age_s("novatel_age"), Some(0.5));
    }

    #[test]
    fn should_reject_touch_of_untracked_label() {
        let mut ages = AgeTracker::new();
        let result = ages.touch("ghost_age", Some(1.0));
        assert_eq!(
            result,
            Err(ValidationError::UntrackedAge("ghost_age".to_string()))
        );
        assert!(ages.is_empty());
    }

    #[test]
    fn should_add_elapsed_time_to_current_age() {
        let mut ages = AgeTracker::new();
        ages.track("novatel_age");
        let written = now();
        ages.touch_at("novatel_age", Some(1.0), written).unwrap();
        let later = written + Duration::seconds(4);
        let current = ages.current_age("novatel_age", later).unwrap();
        assert!((current - 5.0).abs() < 1e-9);
    }

    #[test]
    fn should_serialize_as_label_to_age_map() {
        let mut ages = AgeTracker::new();
        ages.track("a_age");
        ages.track("b_age");
        ages.touch("b_age", Some(3.5)).unwrap();
        let json = serde_json::to_value(&ages).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "a_age": { "age_s": null }, "b_age": { "age_s": 3.5 } })
        );
    }
}
