//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp used for age bookkeeping.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Seconds elapsed from `earlier` to `later`, clamped at zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn seconds_between(earlier: Timestamp, later: Timestamp) -> f64 {
    let millis = (later - earlier).num_milliseconds().max(0);
    millis as f64 / 1000.0
}
