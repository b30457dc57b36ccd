//! Time-of-day and run-duration handling for schedule documents.
//!
//! Schedule files give departure times as "HH:MM:SS" and the time taken to
//! traverse each timing link as an ISO-8601 duration ("PT5M"). Arrival
//! times are plain wall-clock values: no date is carried, and adding a run
//! time that passes midnight wraps around rather than rolling to a new day.

use chrono::{Duration, NaiveTime, Timelike};
use std::fmt;
use std::ops::Add;

/// Error returned when parsing an invalid time-of-day string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time {input:?}: expected HH:MM:SS")]
pub struct TimeError {
    input: String,
}

/// Error returned when parsing an invalid ISO-8601 run duration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid duration {input:?}: {reason}")]
pub struct DurationError {
    input: String,
    reason: String,
}

/// A wall-clock time of day, to the second.
///
/// # Examples
///
/// ```
/// use stop_timetable::domain::{ClockTime, RunTime};
///
/// let departure = ClockTime::parse_hms("08:00:00").unwrap();
/// let hop = RunTime::parse_iso8601("PT5M").unwrap();
/// assert_eq!((departure + hop).to_string(), "08:05:00");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Create a time from hour, minute and second components.
    ///
    /// Returns `None` if any component is out of range.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, second).map(ClockTime)
    }

    /// Parse a time from "HH:MM:SS" format.
    ///
    /// # Examples
    ///
    /// ```
    /// use stop_timetable::domain::ClockTime;
    ///
    /// assert!(ClockTime::parse_hms("00:00:00").is_ok());
    /// assert!(ClockTime::parse_hms("23:59:59").is_ok());
    ///
    /// assert!(ClockTime::parse_hms("08:00").is_err());
    /// assert!(ClockTime::parse_hms("24:00:00").is_err());
    /// assert!(ClockTime::parse_hms("noon").is_err());
    /// ```
    pub fn parse_hms(s: &str) -> Result<Self, TimeError> {
        NaiveTime::parse_from_str(s, "%H:%M:%S")
            .map(ClockTime)
            .map_err(|_| TimeError {
                input: s.to_string(),
            })
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Returns the second (0-59).
    pub fn second(&self) -> u32 {
        self.0.second()
    }

    /// Seconds elapsed since midnight.
    pub fn seconds_from_midnight(&self) -> u32 {
        self.0.num_seconds_from_midnight()
    }
}

impl Add<RunTime> for ClockTime {
    type Output = Self;

    /// Advance the clock, wrapping past midnight.
    fn add(self, rhs: RunTime) -> Self::Output {
        let (time, _days) = self.0.overflowing_add_signed(rhs.0);
        ClockTime(time)
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({})", self)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

/// Time taken to traverse one timing link.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunTime(Duration);

impl RunTime {
    /// A run time of zero.
    pub fn zero() -> Self {
        RunTime(Duration::zero())
    }

    /// Create a run time from a whole number of seconds.
    pub fn from_seconds(seconds: i64) -> Self {
        RunTime(Duration::seconds(seconds))
    }

    /// Parse an ISO-8601 duration such as "PT5M" or "PT1H30M5S".
    ///
    /// # Examples
    ///
    /// ```
    /// use stop_timetable::domain::RunTime;
    ///
    /// assert_eq!(RunTime::parse_iso8601("PT1H30M5S").unwrap().num_seconds(), 5405);
    /// assert!(RunTime::parse_iso8601("five minutes").is_err());
    /// ```
    pub fn parse_iso8601(s: &str) -> Result<Self, DurationError> {
        let std_duration =
            time_parse::duration::parse_nom(s).map_err(|e| DurationError {
                input: s.to_string(),
                reason: e.to_string(),
            })?;
        let duration = Duration::from_std(std_duration).map_err(|e| DurationError {
            input: s.to_string(),
            reason: e.to_string(),
        })?;
        Ok(RunTime(duration))
    }

    /// Total length in whole seconds.
    pub fn num_seconds(&self) -> i64 {
        self.0.num_seconds()
    }
}

impl fmt::Debug for RunTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RunTime({}s)", self.num_seconds())
    }
}
