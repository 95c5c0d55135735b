use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use chrono_tz::Tz;

/// Calendar the Treasury publishes its daily curve in.
pub const TREASURY_MARKET_TZ: Tz = chrono_tz::America::New_York;

/// Converts a UTC instant to the Treasury market's calendar date.
pub fn market_date_from_utc(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&TREASURY_MARKET_TZ).date_naive()
}

/// Today's date on the Treasury market calendar.
pub fn market_date_today() -> NaiveDate {
    market_date_from_utc(Utc::now())
}

/// Current UTC wall-clock time, as stored on ledger records.
pub fn ledger_now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Smallest timestamp that still sorts strictly after `previous`.
///
/// Returns `now` unless the clock has not advanced past `previous`, in which
/// case `previous` plus one microsecond is used.
pub fn next_ledger_timestamp(now: NaiveDateTime, previous: Option<NaiveDateTime>) -> NaiveDateTime {
    match previous {
        Some(prev) if now <= prev => prev + TimeDelta::microseconds(1),
        _ => now,
    }
}
