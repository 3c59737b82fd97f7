//! Time utilities: current timestamp, conversions between epoch milliseconds
//! and local wall-clock time.

use chrono::{DateTime, Local, LocalResult, NaiveDateTime, TimeZone, Utc};

pub fn now_millis() -> i64 {
    Local::now().timestamp_millis()
}

/// Local wall-clock time of an epoch timestamp. Total: out-of-range values
/// collapse to the epoch.
pub fn local_datetime(ms: i64) -> NaiveDateTime {
    match Local.timestamp_millis_opt(ms) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.naive_local(),
        LocalResult::None => DateTime::<Utc>::from_timestamp_millis(ms)
            .unwrap_or_default()
            .naive_utc(),
    }
}

/// Epoch timestamp of a local wall-clock time (earliest match across DST folds).
pub fn local_millis(dt: &NaiveDateTime) -> Option<i64> {
    dt.and_local_timezone(Local)
        .earliest()
        .map(|d| d.timestamp_millis())
}
