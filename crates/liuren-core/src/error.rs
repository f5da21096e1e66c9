//! Error types for the divination engine.

use thiserror::Error;

/// Result type for reading operations.
pub type ReadingResult<T> = Result<T, ReadingError>;

/// Errors raised when a calendar input cannot produce a reading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadingError {
    /// Month outside 1-12.
    #[error("month out of range: {0} (expected 1-12)")]
    MonthOutOfRange(u32),

    /// Day outside 1-31.
    #[error("day out of range: {0} (expected 1-31)")]
    DayOutOfRange(u32),

    /// Hour outside 0-23.
    #[error("hour out of range: {0} (expected 0-23)")]
    HourOutOfRange(u32),

    /// Minute outside 0-59.
    #[error("minute out of range: {0} (expected 0-59)")]
    MinuteOutOfRange(u32),

    /// The fields are individually in range but do not form a calendar date.
    #[error("invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate {
        /// Calendar year.
        year: i32,
        /// Month (1-12).
        month: u32,
        /// Day of month.
        day: u32,
    },

    /// A date/time string could not be parsed.
    #[error("unparseable date/time: \"{0}\"")]
    Unparseable(String),

    /// A serialised reading disagrees with the chain recomputed from its date.
    #[error("inconsistent reading: {0}")]
    Inconsistent(String),

    /// A state name did not match any of the six states.
    #[error("unknown state: \"{0}\"")]
    UnknownState(String),
}
