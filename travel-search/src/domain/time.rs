//! Departure and arrival time handling.
//!
//! The booking backend is inconsistent about timestamps: bus inventory often
//! carries a bare "HH:MM" while flights carry a full ISO 8601 datetime. This
//! module normalises both into a time of day, keeping the raw string so that a
//! record with an unreadable timestamp can still be displayed.

use chrono::{DateTime, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;

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

/// A time of day with minute precision.
///
/// # Examples
///
/// ```
/// use travel_search::domain::ClockTime;
///
/// let time = ClockTime::parse("2024-12-15T22:05:00").unwrap();
/// assert_eq!(time.hour(), 22);
/// assert_eq!(time.to_string(), "22:05");
///
/// let time = ClockTime::parse("06:00").unwrap();
/// assert_eq!(time.to_string(), "06:00");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Create a clock time from hour and minute, if both are in range.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Parse a time from strict "HH:MM" format.
    ///
    /// ```
    /// use travel_search::domain::ClockTime;
    ///
    /// assert!(ClockTime::parse_hhmm("00:00").is_ok());
    /// assert!(ClockTime::parse_hhmm("23:59").is_ok());
    ///
    /// assert!(ClockTime::parse_hhmm("2359").is_err());
    /// assert!(ClockTime::parse_hhmm("9:30").is_err());
    /// assert!(ClockTime::parse_hhmm("24:00").is_err());
    /// ```
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();

        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        Self::from_hm(hour, minute).ok_or_else(|| TimeError::new("invalid time"))
    }

    /// Parse any timestamp shape the backend is known to send.
    ///
    /// Accepts "HH:MM", "HH:MM:SS", a local ISO 8601 datetime
    /// ("2024-12-15T22:00:00", optionally with fractional seconds or without
    /// seconds) and an RFC 3339 datetime with offset. For datetimes with an
    /// offset the time of day is taken as written, not converted to UTC.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let s = s.trim();

        if s.len() == 5 {
            return Self::parse_hhmm(s);
        }

        if let Ok(time) = NaiveTime::parse_from_str(s, "%H:%M:%S") {
            return Ok(Self::truncate(time));
        }

        parse_datetime(s)
            .map(|dt| Self::truncate(dt.time()))
            .ok_or_else(|| TimeError::new("unrecognised timestamp format"))
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Minutes since midnight.
    pub fn minutes_from_midnight(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    fn truncate(time: NaiveTime) -> Self {
        // Seconds never matter for display or slotting
        Self(NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time))
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// A departure or arrival timestamp as received from the backend.
///
/// The raw string is always kept. When it parses, the time of day (and the
/// full datetime, if one was given) is available too. A timestamp that does
/// not parse is not an error: the offer is still shown, it just never matches
/// a departure-slot filter.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferTime {
    raw: String,
    clock: Option<ClockTime>,
    datetime: Option<NaiveDateTime>,
    label: String,
}

impl OfferTime {
    /// Parse a backend timestamp, keeping the raw text whatever the outcome.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let clock = ClockTime::parse(&raw).ok();
        let datetime = parse_datetime(raw.trim());
        let label = match clock {
            Some(c) => c.to_string(),
            None => raw.clone(),
        };

        Self {
            raw,
            clock,
            datetime,
            label,
        }
    }

    /// The string exactly as the backend sent it.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Time of day, or `None` if the timestamp was malformed.
    pub fn clock(&self) -> Option<ClockTime> {
        self.clock
    }

    /// Full datetime, when the backend sent a date as well as a time.
    pub fn datetime(&self) -> Option<NaiveDateTime> {
        self.datetime
    }

    /// Whether the timestamp could not be read.
    pub fn is_malformed(&self) -> bool {
        self.clock.is_none()
    }

    /// "HH:MM" for readable timestamps, the raw string otherwise.
    ///
    /// This is the value departure ordering compares on.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whole minutes from `self` to `later`, when both carry full datetimes
    /// and `later` is not before `self`.
    pub fn minutes_until(&self, later: &OfferTime) -> Option<u32> {
        let start = self.datetime?;
        let end = later.datetime?;
        let minutes = end.signed_duration_since(start).num_minutes();
        u32::try_from(minutes).ok()
    }
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = s.parse::<NaiveDateTime>() {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.naive_local())
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}
