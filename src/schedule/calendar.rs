// src/schedule/calendar.rs

//! Day-granularity time arithmetic.
//!
//! Truncation happens in a fixed UTC offset so that "which calendar day" is
//! the same for every caller regardless of the host timezone.

use chrono::{DateTime, FixedOffset, NaiveTime, Utc};

use crate::schedule::item::DependencyLag;

/// Midnight (in `offset`) of the calendar day containing `ts`, as UTC.
///
/// Near the edges of chrono's range the local day may not be representable;
/// `ts` is then returned unchanged.
pub fn truncate_to_day(ts: DateTime<Utc>, offset: FixedOffset) -> DateTime<Utc> {
    ts.naive_utc()
        .checked_add_offset(offset)
        .map(|local| local.date().and_time(NaiveTime::MIN))
        .and_then(|midnight| midnight.checked_sub_offset(offset))
        .map(|utc| utc.and_utc())
        .unwrap_or(ts)
}

/// Signed number of whole days from `from` to `to`, truncated toward zero.
pub fn whole_days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_days()
}

/// `ts` shifted by `lag`, saturating at chrono's representable range.
pub fn apply_lag(ts: DateTime<Utc>, lag: &DependencyLag) -> DateTime<Utc> {
    match lag.as_delta().and_then(|delta| ts.checked_add_signed(delta)) {
        Some(shifted) => shifted,
        None if lag.lag < 0 => DateTime::<Utc>::MIN_UTC,
        None => DateTime::<Utc>::MAX_UTC,
    }
}
