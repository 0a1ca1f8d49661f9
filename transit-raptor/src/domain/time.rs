//! Timetable time handling.
//!
//! GTFS expresses times as "HH:MM:SS" relative to local midnight of the
//! service day. Hours may exceed 23 for trips that run past midnight, so a
//! time is simply a count of seconds and 25:10:00 is a valid value.

/// Seconds since local midnight of the service day.
///
/// May exceed [`ONE_DAY`] for arrivals after midnight on the same trip.
pub type Time = u32;

/// A span of time in seconds.
pub type Duration = u32;

/// Number of seconds in one day.
pub const ONE_DAY: Time = 24 * 60 * 60;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Parse a time from "HH:MM:SS" or "HH:MM" format into seconds since midnight.
///
/// Hours are not capped at 23, matching GTFS semantics for trips that run
/// past midnight.
///
/// # Examples
///
/// ```
/// use transit_raptor::domain::parse_time;
///
/// assert_eq!(parse_time("00:00:00").unwrap(), 0);
/// assert_eq!(parse_time("10:30").unwrap(), 37_800);
/// assert_eq!(parse_time("25:00:05").unwrap(), 90_005);
///
/// assert!(parse_time("10").is_err());
/// assert!(parse_time("10:60:00").is_err());
/// assert!(parse_time("aa:bb:cc").is_err());
/// ```
pub fn parse_time(s: &str) -> Result<Time, TimeError> {
    let mut parts = s.trim().split(':');

    let hours = parts
        .next()
        .and_then(parse_digits)
        .ok_or_else(|| TimeError::new("invalid hour digits"))?;
    let minutes = parts
        .next()
        .and_then(parse_digits)
        .ok_or_else(|| TimeError::new("expected HH:MM or HH:MM:SS format"))?;
    let seconds = match parts.next() {
        Some(part) => parse_digits(part).ok_or_else(|| TimeError::new("invalid second digits"))?,
        None => 0,
    };

    if parts.next().is_some() {
        return Err(TimeError::new("too many components"));
    }
    if minutes > 59 {
        return Err(TimeError::new("minute must be 0-59"));
    }
    if seconds > 59 {
        return Err(TimeError::new("second must be 0-59"));
    }

    hours
        .checked_mul(3600)
        .and_then(|h| h.checked_add(minutes * 60 + seconds))
        .ok_or_else(|| TimeError::new("time overflow"))
}

/// Format seconds since midnight as "HH:MM:SS".
///
/// ```
/// use transit_raptor::domain::format_time;
///
/// assert_eq!(format_time(37_800), "10:30:00");
/// assert_eq!(format_time(90_005), "25:00:05");
/// ```
pub fn format_time(time: Time) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        time / 3600,
        (time % 3600) / 60,
        time % 60
    )
}

/// Parse one or two ASCII digits.
fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
