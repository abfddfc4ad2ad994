//! Relative age labels for note timestamps.
//!
//! Day counting rounds elapsed time up to whole days, so anything within the
//! last 24 hours is "Today" and 24h..48h is "Yesterday". `now` is always
//! injected; nothing here reads a clock.

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

const MILLIS_PER_DAY: u64 = 24 * 60 * 60 * 1000;

/// Formats `timestamp` relative to `now`.
///
/// - 0 or 1 day: `Today at HH:MM`
/// - 2 days: `Yesterday at HH:MM`
/// - 3..=7 days: `<days - 1> days ago`
/// - later: `Mon D, YYYY, HH:MM`
///
/// Clock times are rendered in the timestamp's own zone. Direction is
/// ignored, so future timestamps are labelled by distance.
pub fn format_relative_age<Tz, Now>(timestamp: &DateTime<Tz>, now: &DateTime<Now>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
    Now: TimeZone,
{
    let days = elapsed_days(timestamp.timestamp_millis(), now.timestamp_millis());
    match days {
        0 | 1 => format!("Today at {}", timestamp.format("%H:%M")),
        2 => format!("Yesterday at {}", timestamp.format("%H:%M")),
        3..=7 => format!("{} days ago", days - 1),
        _ => timestamp.format("%b %-d, %Y, %H:%M").to_string(),
    }
}

fn elapsed_days(from_ms: i64, to_ms: i64) -> u64 {
    to_ms.abs_diff(from_ms).div_ceil(MILLIS_PER_DAY)
}
