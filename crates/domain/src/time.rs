//! Time and timestamp helpers.

use chrono::{DateTime, Local, Timelike, Utc};

/// UTC timestamp used for `last_changed`, `last_triggered` and tick bookkeeping.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Hour of day (0–23) of `ts` in the machine's local time zone.
///
/// Routine rules are written against wall-clock hours as seen by the user.
#[must_use]
pub fn local_hour(ts: Timestamp) -> u32 {
    ts.with_timezone(&Local).hour()
}

/// Short human description of how long ago `then` was, relative to `now`.
#[must_use]
pub fn ago(then: Timestamp, now: Timestamp) -> String {
    let secs = (now - then).num_seconds().max(0);
    if secs < 60 {
        "just now".to_string()
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else {
        format!("{}h ago", secs / 3600)
    }
}
