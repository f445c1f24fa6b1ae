use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::America::New_York;

/// Seconds from `now` until the next midnight on the NYSE clock
/// (America/New_York), rounded up and never below `min_seconds`.
///
/// Daily bars roll over once per trading day, so upstream responses stay
/// valid until then.
pub fn seconds_until_next_et_midnight(now: DateTime<Utc>, min_seconds: u64) -> u64 {
    let next_midnight = now
        .with_timezone(&New_York)
        .date_naive()
        .succ_opt()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .and_then(|midnight| New_York.from_local_datetime(&midnight).earliest());

    let Some(next_midnight) = next_midnight else {
        return min_seconds;
    };

    let millis = (next_midnight.with_timezone(&Utc) - now).num_milliseconds().max(0) as u64;
    millis.div_ceil(1000).max(min_seconds)
}

/// The instant at which responses fetched at `now` should be refreshed.
pub fn next_revalidation(now: DateTime<Utc>, min_seconds: u64) -> DateTime<Utc> {
    let secs = seconds_until_next_et_midnight(now, min_seconds);
    i64::try_from(secs)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|d| now.checked_add_signed(d))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
