//! TransXChange schedule documents.
//!
//! A TransXChange file describes one service: its line, the journey
//! patterns vehicles follow, the timing links those patterns are built
//! from, and the vehicle journeys that run them. Records refer to each
//! other by id string, so a document is parsed once and the records a
//! journey needs are looked up through an id index.

mod document;
mod error;
mod records;
mod xml;

pub use document::{ScheduleDocument, extract_arrivals};
pub use error::ExtractError;
pub use records::{JourneyPattern, TimingLink, VehicleJourney};
pub use xml::TXC_NS;
