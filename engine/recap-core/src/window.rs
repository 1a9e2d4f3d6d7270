//! Civil-time window selection for digest and rumor jobs
//!
//! All bucketing and scheduling guards share the same fixed zone so the
//! digest windows and the "only run at this local hour" checks can never
//! drift apart.

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Timelike, Utc, Weekday};
use chrono_tz::America::New_York;
use chrono_tz::Tz;

/// The league's civil time zone
pub const REPORT_TZ: Tz = New_York;

/// Epoch milliseconds of local midnight for a civil date
fn local_midnight_ms(day: NaiveDate) -> i64 {
    let midnight = day.and_time(NaiveTime::MIN);
    match REPORT_TZ.from_local_datetime(&midnight) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.timestamp_millis(),
        // A DST gap at midnight would shift the day boundary to the first
        // valid local instant.
        LocalResult::None => REPORT_TZ
            .from_local_datetime(&(midnight + Duration::hours(1)))
            .earliest()
            .map_or(0, |dt| dt.timestamp_millis()),
    }
}

/// Half-open `[start_ms, end_ms)` covering the civil day `days_back` whole
/// days before `now`
///
/// `days_back = 1` is "yesterday". The window spans local midnight to the
/// following local midnight, so DST transition days are 23 or 25 hours.
pub fn day_bounds(now: DateTime<Utc>, days_back: i64) -> (i64, i64) {
    let local_today = now.with_timezone(&REPORT_TZ).date_naive();
    let target = local_today - Duration::days(days_back);
    (local_midnight_ms(target), local_midnight_ms(target + Duration::days(1)))
}

/// Lower bound of an open rolling window starting `days_back` civil days ago
pub fn rolling_start(now: DateTime<Utc>, days_back: i64) -> i64 {
    day_bounds(now, days_back).0
}

/// Scheduling guard: does `now` fall in the given local hour (and weekday,
/// when one is required)?
pub fn matches_local_hour(now: DateTime<Utc>, hour: u32, weekday: Option<Weekday>) -> bool {
    let local = now.with_timezone(&REPORT_TZ);
    if let Some(dow) = weekday {
        if local.weekday() != dow {
            return false;
        }
    }
    local.hour() == hour
}
