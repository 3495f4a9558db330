//! UTC timestamp helpers for audit fields.
//!
//! # Invariants
//! - Timestamps carry at most microsecond precision so text round-trips
//!   through SQLite are exact.
//! - `advance` never returns a value earlier than or equal to `previous`.

use chrono::{DateTime, Datelike, Duration, SecondsFormat, SubsecRound, Utc};

pub type Timestamp = DateTime<Utc>;

/// Current UTC time truncated to microseconds.
pub fn now_utc() -> Timestamp {
    Utc::now().trunc_subsecs(6)
}

/// Returns `now` when it is later than `previous`, otherwise one microsecond
/// past `previous`.
///
/// Wall clocks can repeat or step backwards; update timestamps must still
/// strictly advance.
pub fn advance(previous: Timestamp, now: Timestamp) -> Timestamp {
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

/// True when `value` has a four-digit year, the range the text form can
/// carry.
pub fn is_storable(value: &Timestamp) -> bool {
    (0..=9999).contains(&value.year())
}

/// Canonical text form used for persistence.
pub fn to_db_text(value: &Timestamp) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parses the persisted text form back into UTC.
pub fn parse_db_text(value: &str) -> Option<Timestamp> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}
