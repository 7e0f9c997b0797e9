//! Time-of-day codec for itinerary items.
//!
//! Item start/end times are stored as integer minutes since midnight and
//! rendered as `"H:MM"` strings at the read boundary (no leading zero on the
//! hour, minute precision, no seconds).

/// Render minutes-since-midnight as `"H:MM"` (e.g. 570 -> `"9:30"`).
pub fn format_minutes(minutes: i32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    format!("{hours}:{mins:02}")
}

/// Parse a `"H:MM"` or `"HH:MM"` clock string into minutes since midnight.
///
/// Returns `None` for anything that is not a valid 24-hour clock time.
pub fn parse_clock(s: &str) -> Option<i32> {
    let (h, m) = s.split_once(':')?;
    let hours: i32 = h.parse().ok()?;
    let mins: i32 = m.parse().ok()?;
    if !(0..24).contains(&hours) || !(0..60).contains(&mins) || m.len() != 2 {
        return None;
    }
    Some(hours * 60 + mins)
}
