//! A parsed schedule document and arrival-time extraction.

use minidom::Element;
use tracing::{debug, trace};

use crate::domain::{ArrivalTimes, StopCode};

use super::error::ExtractError;
use super::records::{JourneyPattern, RecordIndex, TimingLink, VehicleJourney};
use super::xml::{TxcElement, strip_markup_noise};

/// One TransXChange document, parsed and ready to query.
#[derive(Debug, Clone)]
pub struct ScheduleDocument {
    root: Element,
}

impl ScheduleDocument {
    /// Parse a document from raw file bytes.
    ///
    /// A leading UTF-8 byte order mark is ignored, as are comments and
    /// processing instructions.
    pub fn parse(bytes: &[u8]) -> Result<Self, ExtractError> {
        let text = std::str::from_utf8(bytes)?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let root: Element = strip_markup_noise(text).parse()?;
        Ok(Self { root })
    }

    /// Name of the line this document schedules.
    ///
    /// Taken from the first `Service/Lines/Line/LineName`; a document with
    /// several services or lines is named after the first one.
    pub fn line_name(&self) -> Result<String, ExtractError> {
        self.root
            .txc_descendants("Service")
            .into_iter()
            .flat_map(|service| service.txc_children("Lines"))
            .flat_map(|lines| lines.txc_children("Line"))
            .flat_map(|line| line.txc_children("LineName"))
            .map(|name| name.text().trim().to_string())
            .find(|name| !name.is_empty())
            .ok_or(ExtractError::MissingLineName)
    }

    /// Whether any stop reference anywhere in the document is `stop`.
    pub fn serves_stop(&self, stop: &StopCode) -> bool {
        self.root
            .txc_descendants("StopPointRef")
            .into_iter()
            .any(|r| r.text().trim() == stop.as_str())
    }

    /// Arrival times at `stop`, grouped by destination.
    ///
    /// Every journey's clock starts at its departure time and advances by
    /// each timing link's run time. Within a section, the first link that
    /// leaves from or arrives at `stop` records the time at the end of that
    /// link; the rest of the section is skipped and the clock picks up again
    /// at the next section, so a journey passing the stop in several
    /// sections records one time per section.
    ///
    /// For a stop in the middle of a route the link arriving there matches
    /// first, so the recorded time is the arrival at the stop itself. Matching
    /// on `From` alone would record the end of the following link instead,
    /// one hop later.
    ///
    /// Returns an empty mapping straight away when no stop reference in the
    /// document matches. Any record that cannot be resolved or read fails
    /// the whole document.
    pub fn arrivals(&self, stop: &StopCode) -> Result<ArrivalTimes, ExtractError> {
        let mut arrivals = ArrivalTimes::new();

        if !self.serves_stop(stop) {
            trace!(stop = %stop, "stop not referenced");
            return Ok(arrivals);
        }

        let index = RecordIndex::build(&self.root);

        for element in self.root.txc_descendants("VehicleJourney") {
            let journey = VehicleJourney::from_element(element)?;
            let pattern =
                JourneyPattern::from_element(index.pattern(&journey.journey_pattern_ref)?)?;

            let mut clock = journey.departure_time;
            for section_ref in &pattern.section_refs {
                let section = index.section(section_ref)?;

                for link in section.txc_descendants("JourneyPatternTimingLink") {
                    let link = TimingLink::from_element(link)?;
                    let arrival = clock + link.run_time;

                    if link.touches(stop.as_str()) {
                        arrivals.push(&pattern.destination, arrival);
                        break;
                    }
                    clock = arrival;
                }
            }
        }

        Ok(arrivals)
    }

    /// Arrival times at `stop`, or an empty mapping if the document is
    /// broken in any way.
    pub fn extract(&self, stop: &StopCode) -> ArrivalTimes {
        self.arrivals(stop).unwrap_or_else(|e| {
            debug!(stop = %stop, error = %e, "discarding unreadable schedule");
            ArrivalTimes::new()
        })
    }
}

/// Extract arrival times at `stop` from raw document bytes.
///
/// Never fails: unparsable documents, unresolved references and absent
/// stops all yield an empty mapping.
pub fn extract_arrivals(document: &[u8], stop: &StopCode) -> ArrivalTimes {
    match ScheduleDocument::parse(document) {
        Ok(doc) => doc.extract(stop),
        Err(e) => {
            debug!(error = %e, "discarding unparsable schedule");
            ArrivalTimes::new()
        }
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
