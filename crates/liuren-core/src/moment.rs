//! Input timestamps: parsing, validation, and time sources.
//!
//! All timestamps are local wall-clock values ([`NaiveDateTime`]); the
//! chain reads the calendar month, day and hour exactly as written, with no
//! UTC normalisation.

use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::error::{ReadingError, ReadingResult};

/// Formats accepted by [`parse_moment`], tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Build a timestamp from calendar fields, rejecting anything out of range.
pub fn moment_from_parts(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
) -> ReadingResult<NaiveDateTime> {
    if !(1..=12).contains(&month) {
        return Err(ReadingError::MonthOutOfRange(month));
    }
    if !(1..=31).contains(&day) {
        return Err(ReadingError::DayOutOfRange(day));
    }
    if hour > 23 {
        return Err(ReadingError::HourOutOfRange(hour));
    }
    if minute > 59 {
        return Err(ReadingError::MinuteOutOfRange(minute));
    }
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(ReadingError::InvalidDate { year, month, day })?;
    date.and_hms_opt(hour, minute, 0)
        .ok_or(ReadingError::HourOutOfRange(hour))
}

/// Parse a local date/time string.
///
/// Accepts `YYYY-MM-DDTHH:MM` (the HTML `datetime-local` shape), a space
/// instead of `T`, optional seconds, or a bare `YYYY-MM-DD` meaning midnight.
pub fn parse_moment(s: &str) -> ReadingResult<NaiveDateTime> {
    let s = s.trim();
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| ReadingError::Unparseable(s.to_string()))
}

/// Supplies the timestamp a divination is cast for.
pub trait TimeSource {
    /// The current local wall-clock time.
    fn now(&self) -> NaiveDateTime;
}

/// Reads the system's local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always returns the same timestamp. Used for backtests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl TimeSource for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parse_datetime_local_shape() {
        let dt = parse_moment("2024-03-05T14:30").unwrap();
        assert_eq!((dt.month(), dt.day(), dt.hour(), dt.minute()), (3, 5, 14, 30));
    }

    #[test]
    fn parse_variants() {
        let expected = moment_from_parts(2024, 12, 31, 23, 5).unwrap();
        assert_eq!(parse_moment("2024-12-31 23:05").unwrap(), expected);
        assert_eq!(parse_moment("2024-12-31T23:05:00").unwrap(), expected);
        assert_eq!(parse_moment("  2024-12-31 23:05:00 ").unwrap(), expected);
    }

    #[test]
    fn parse_bare_date_is_midnight() {
        let dt = parse_moment("2025-01-01").unwrap();
        assert_eq!(dt.hour(), 0);
        assert_eq!(dt.minute(), 0);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(
            parse_moment("yesterday"),
            Err(ReadingError::Unparseable("yesterday".into()))
        );
        assert!(parse_moment("2024-02-30T10:00").is_err());
        assert!(parse_moment("2024-13-01").is_err());
        assert!(parse_moment("2024-01-01T24:00").is_err());
    }

    #[test]
    fn parts_validated() {
        assert_eq!(
            moment_from_parts(2024, 0, 1, 0, 0),
            Err(ReadingError::MonthOutOfRange(0))
        );
        assert_eq!(
            moment_from_parts(2024, 1, 32, 0, 0),
            Err(ReadingError::DayOutOfRange(32))
        );
        assert_eq!(
            moment_from_parts(2024, 1, 1, 24, 0),
            Err(ReadingError::HourOutOfRange(24))
        );
        assert_eq!(
            moment_from_parts(2024, 1, 1, 0, 60),
            Err(ReadingError::MinuteOutOfRange(60))
        );
    }

    #[test]
    fn day_must_fit_month() {
        assert_eq!(
            moment_from_parts(2023, 2, 29, 0, 0),
            Err(ReadingError::InvalidDate {
                year: 2023,
                month: 2,
                day: 29
            })
        );
        assert!(moment_from_parts(2024, 2, 29, 0, 0).is_ok());
        assert!(moment_from_parts(2024, 4, 31, 0, 0).is_err());
    }

    #[test]
    fn fixed_clock_is_fixed() {
        let t = moment_from_parts(2024, 6, 1, 9, 0).unwrap();
        let clock = FixedClock(t);
        assert_eq!(clock.now(), t);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn system_clock_returns_valid_time() {
        let now = SystemClock.now();
        assert!(now.hour() < 24);
        assert!((1..=12).contains(&now.month()));
    }
}
