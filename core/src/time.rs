//! Time related utils.

use chrono::Utc;

/// DateTime in UTC, the only timezone the service signs with.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Parse a unix timestamp in seconds into datetime.
///
/// Returns `None` if the timestamp is out of range.
pub fn from_timestamp(secs: i64) -> Option<DateTime> {
    DateTime::from_timestamp(secs, 0)
}
