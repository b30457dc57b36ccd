//! Bus stop timetable builder.
//!
//! Answers "which buses call at this stop, and when?" from two local
//! inputs: a saved catalogue of published bus datasets and a bundle of the
//! TransXChange schedule files those datasets point at.

pub mod aggregate;
pub mod archive;
pub mod catalogue;
pub mod config;
pub mod domain;
pub mod output;
pub mod transxchange;
