//! Domain types for the stop timetable builder.
//!
//! Identifiers and times are validated at construction, so the catalogue
//! and schedule code can pass them around without re-checking.

mod stop;
mod time;
mod timetable;

pub use stop::{InvalidLocalityId, InvalidStopCode, LocalityId, StopCode, StopIdentity};
pub use time::{ClockTime, DurationError, RunTime, TimeError};
pub use timetable::{ArrivalTimes, TimetableEntry};
