//! Date formatting for response headers and error bodies.
//!
//! Formats `SystemTime` without pulling in a calendar crate: an RFC-1123
//! style date for the `Date` header and an RFC-3339 timestamp for JSON
//! bodies and log lines.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

const SECONDS_PER_DAY: u64 = 86_400;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

struct DateTime {
    year: i64,
    month: usize,
    day: u64,
    hour: u64,
    minute: u64,
    second: u64,
    weekday: usize,
}

/// Format a date suitable for the `Date` response header, e.g.
/// `Thu, 01 Jan 1970 00:00:00 GMT`.
pub(crate) fn fmt_http_date(d: SystemTime) -> String {
    let t = parts(d);
    format!(
        "{}, {:02} {} {} {:02}:{:02}:{:02} GMT",
        WEEKDAYS[t.weekday], t.day, MONTHS[t.month], t.year, t.hour, t.minute, t.second
    )
}

/// Format an RFC-3339 UTC timestamp, e.g. `1970-01-01T00:00:00Z`.
pub(crate) fn fmt_rfc3339(d: SystemTime) -> String {
    let t = parts(d);
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        t.year,
        t.month + 1,
        t.day,
        t.hour,
        t.minute,
        t.second
    )
}

fn parts(d: SystemTime) -> DateTime {
    let secs = d
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| Duration::from_secs(0))
        .as_secs();
    let days = secs / SECONDS_PER_DAY;
    let secs_of_day = secs % SECONDS_PER_DAY;

    // 1970-01-01 was a Thursday.
    let weekday = ((days + 4) % 7) as usize;

    // Days-to-civil conversion over the 400-year Gregorian cycle.
    let z = days as i64 + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u64;
    let month = (if mp < 10 { mp + 2 } else { mp - 10 }) as usize;
    let year = yoe + era * 400 + if month < 2 { 1 } else { 0 };

    DateTime {
        year,
        month,
        day,
        hour: secs_of_day / 3_600,
        minute: (secs_of_day % 3_600) / 60,
        second: secs_of_day % 60,
        weekday,
    }
}
