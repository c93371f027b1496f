//! Snapshot: one push of current sensor/system data, keyed by source name.
//!
//! A snapshot arrives as a whole on every update and is never patched.
//! Each source record may carry `_now`, the number of seconds since that
//! source's data was captured. Everything else is source-specific and is
//! decoded on demand by the handler that cares about it.
//!
//! Records are kept as raw JSON. A record with the wrong shape only fails
//! the handlers that read it; the rest of the snapshot is unaffected.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SnapshotError;

/// Key of the age field inside a source record.
pub const NOW_KEY: &str = "_now";

/// Immutable mapping from source name to its latest raw record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    sources: BTreeMap<String, Value>,
}

impl Snapshot {
    /// Create an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a source record.
    #[must_use]
    pub fn with_source(self, name: impl Into<String>, record: SourceRecord) -> Self {
        self.with_raw(name, record.into_value())
    }

    /// Add (or replace) a source with an arbitrary JSON value.
    #[must_use]
    pub fn with_raw(mut self, name: impl Into<String>, value: Value) -> Self {
        self.sources.insert(name.into(), value);
        self
    }

    /// Decode the record for `name`, if this snapshot carries one.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] when the record is not a JSON object or
    /// its `_now` is not a number.
    pub fn source(&self, name: &str) -> Result<Option<SourceRecord>, SnapshotError> {
        self.sources
            .get(name)
            .map(|value| SourceRecord::from_value(name, value))
            .transpose()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.sources.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Data from a single source inside a [`Snapshot`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceRecord {
    /// Seconds since the data was captured.
    pub now: Option<f64>,
    /// Source-specific payload, without `_now`.
    pub fields: Map<String, Value>,
}

impl SourceRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Split a raw record into its age and payload.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::NotAnObject`] or [`SnapshotError::InvalidAge`].
    pub fn from_value(source_name: &str, value: &Value) -> Result<Self, SnapshotError> {
        let Value::Object(map) = value else {
            return Err(SnapshotError::NotAnObject {
                source_name: source_name.to_string(),
            });
        };
        let mut fields = map.clone();
        let now = match fields.remove(NOW_KEY) {
            None | Some(Value::Null) => None,
            Some(Value::Number(number)) => number.as_f64(),
            Some(other) => {
                return Err(SnapshotError::InvalidAge {
                    source_name: source_name.to_string(),
                    found: other.to_string(),
                });
            }
        };
        Ok(Self { now, fields })
    }

    fn into_value(self) -> Value {
        let mut map = self.fields;
        if let Some(now) = self.now {
            map.insert(NOW_KEY.to_string(), Value::from(now));
        }
        Value::Object(map)
    }

    #[must_use]
    pub fn with_age(mut self, age_s: f64) -> Self {
        self.now = Some(age_s);
        self
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// The `_now` value of this record.
    #[must_use]
    pub fn age_s(&self) -> Option<f64> {
        self.now
    }

    /// Raw access to a single field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Decode the whole payload into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Decode`] when the payload does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self, source_name: &str) -> Result<T, SnapshotError> {
        serde_json::from_value(Value::Object(self.fields.clone())).map_err(|source| {
            SnapshotError::Decode {
                source_name: source_name.to_string(),
                source,
            }
        })
    }

    /// Decode a single field into `T`, or `None` when the field is absent or null.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Decode`] when the field is present but malformed.
    pub fn decode_field<T: DeserializeOwned>(
        &self,
        source_name: &str,
        field: &str,
    ) -> Result<Option<T>, SnapshotError> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|source| SnapshotError::Decode {
                    source_name: source_name.to_string(),
                    source,
                }),
        }
    }
}

/// Render a JSON scalar the way a user expects to read it.
///
/// Strings are shown without quotes, `null` as `?`, everything else in its
/// JSON form.
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "?".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_parse_now_and_fields_from_json() {
        let snapshot: Snapshot = serde_json::from_value(json!({
            "novatel": { "_now": 1.5, "record": "#BESTPOSA" },
            "cpt6100_port0": { "pressure": 1013.2 }
        }))
        .unwrap();

        let novatel = snapshot.source("novatel").unwrap().unwrap();
        assert_eq!(novatel.age_s(), Some(1.5));
        assert_eq!(novatel.field("record"), Some(&json!("#BESTPOSA")));
        assert!(novatel.field("_now").is_none());

        let port = snapshot.source("cpt6100_port0").unwrap().unwrap();
        assert_eq!(port.age_s(), None);
    }

    #[test]
    fn should_return_none_for_absent_source() {
        let snapshot = Snapshot::new().with_source("hmt310", SourceRecord::new());
        assert!(snapshot.source("novatel").unwrap().is_none());
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn should_accept_any_json_per_source_and_fail_only_on_read() {
        let snapshot: Snapshot = serde_json::from_value(json!({
            "novatel": { "_now": 1.0, "record": "x" },
            "status": "ok",
            "hmt310": { "_now": "recent" }
        }))
        .unwrap();

        assert!(snapshot.source("novatel").unwrap().is_some());
        assert!(matches!(
            snapshot.source("status"),
            Err(SnapshotError::NotAnObject { .. })
        ));
        assert!(matches!(
            snapshot.source("hmt310"),
            Err(SnapshotError::InvalidAge { ref found, .. }) if found == "\"recent\""
        ));
    }

    #[test]
    fn should_keep_age_when_built_from_record() {
        let snapshot =
            Snapshot::new().with_source("novatel", SourceRecord::new().with_age(2.5).with_field("record", "x"));
        let record = snapshot.source("novatel").unwrap().unwrap();
        assert_eq!(record.age_s(), Some(2.5));
        assert_eq!(record.fields.len(), 1);
    }

    #[test]
    fn should_decode_typed_payload() {
        #[derive(Deserialize)]
        struct Reading {
            record: String,
        }

        let record = SourceRecord::new().with_field("record", "hello");
        let reading: Reading = record.decode("novatel").unwrap();
        assert_eq!(reading.record, "hello");
    }

    #[test]
    fn should_report_source_name_when_decode_fails() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Reading {
            record: String,
        }

        let record = SourceRecord::new().with_field("record", 42);
        let err = record.decode::<Reading>("novatel").unwrap_err();
        assert!(err.to_string().contains("novatel"));
    }

    #[test]
    fn should_treat_null_field_as_absent() {
        let record = SourceRecord::new().with_field("chan_0", Value::Null);
        let decoded: Option<u32> = record.decode_field("usb", "chan_0").unwrap();
        assert!(decoded.is_none());
        let missing: Option<u32> = record.decode_field("usb", "chan_1").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn should_display_strings_without_quotes() {
        assert_eq!(display_value(&json!("21.4")), "21.4");
        assert_eq!(display_value(&json!(21.4)), "21.4");
        assert_eq!(display_value(&Value::Null), "?");
    }
}
