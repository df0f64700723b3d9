//! Relative-age formatting ("3.5 mins ago").

use time::OffsetDateTime;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;

/// Format the age of `when` relative to `now`.
///
/// Both instants are rounded to the nearest second first. The widest unit
/// the difference strictly exceeds is used, so exactly one hour prints as
/// `"60.0 mins ago"`. Differences of one second or less (including negative
/// ones, where `when` is after `now`) print as `"1.0 sec ago"`.
pub fn time_ago(when: OffsetDateTime, now: OffsetDateTime) -> String {
    let diff = round_to_second(now) - round_to_second(when);
    let secs = diff as f64;

    if diff > WEEK {
        format!("{:.1} weeks ago", secs / WEEK as f64)
    } else if diff > DAY {
        format!("{:.1} days ago", secs / DAY as f64)
    } else if diff > HOUR {
        format!("{:.1} hours ago", secs / HOUR as f64)
    } else if diff > MINUTE {
        format!("{:.1} mins ago", secs / MINUTE as f64)
    } else if diff > 1 {
        format!("{:.1} secs ago", secs)
    } else {
        "1.0 sec ago".to_string()
    }
}

/// Unix seconds, rounding half-seconds up.
fn round_to_second(t: OffsetDateTime) -> i64 {
    let nanos = t.unix_timestamp_nanos();
    let secs = nanos.div_euclid(1_000_000_000);
    let rem = nanos.rem_euclid(1_000_000_000);
    let rounded = if rem >= 500_000_000 { secs + 1 } else { secs };
    rounded as i64
}
