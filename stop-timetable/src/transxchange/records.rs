//! Typed views of the TransXChange records the extractor walks.
//!
//! Records are read from the DOM only when a journey reaches them, so a
//! broken record that no journey references never affects the result.

use std::collections::HashMap;

use minidom::Element;

use crate::domain::{ClockTime, RunTime};

use super::error::ExtractError;
use super::xml::TxcElement;

/// One scheduled run of a vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleJourney {
    pub departure_time: ClockTime,
    pub journey_pattern_ref: String,
}

impl VehicleJourney {
    pub fn from_element(element: &Element) -> Result<Self, ExtractError> {
        let departure_time = element.txc_child_text("DepartureTime")?;
        let journey_pattern_ref = element.txc_child_text("JourneyPatternRef")?;

        Ok(Self {
            departure_time: ClockTime::parse_hms(&departure_time)?,
            journey_pattern_ref,
        })
    }
}

/// The path shared by a set of journeys: where they are heading and which
/// sections they run through, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyPattern {
    pub destination: String,
    pub section_refs: Vec<String>,
}

impl JourneyPattern {
    pub fn from_element(element: &Element) -> Result<Self, ExtractError> {
        let destination = element
            .txc_descendants("DestinationDisplay")
            .first()
            .map(|e| e.text().trim().to_string())
            .ok_or_else(|| ExtractError::MissingElement {
                parent: element.name().to_string(),
                child: "DestinationDisplay",
            })?;

        let section_refs = element
            .txc_descendants("JourneyPatternSectionRefs")
            .into_iter()
            .map(|e| e.text().trim().to_string())
            .collect();

        Ok(Self {
            destination,
            section_refs,
        })
    }
}

/// One stop-to-stop hop inside a journey pattern section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingLink {
    pub from_stop: String,
    /// Absent `To` is tolerated; only `From` is required to walk a section.
    pub to_stop: Option<String>,
    pub run_time: RunTime,
}

impl TimingLink {
    pub fn from_element(element: &Element) -> Result<Self, ExtractError> {
        let from_stop = element.txc_child("From")?.txc_child_text("StopPointRef")?;
        let to_stop = element
            .txc_child("To")
            .and_then(|to| to.txc_child_text("StopPointRef"))
            .ok();
        let run_time = RunTime::parse_iso8601(&element.txc_child_text("RunTime")?)?;

        Ok(Self {
            from_stop,
            to_stop,
            run_time,
        })
    }

    /// Whether this hop leaves from or arrives at `stop`.
    pub fn touches(&self, stop: &str) -> bool {
        self.from_stop == stop || self.to_stop.as_deref() == Some(stop)
    }
}

/// Id lookup for the records journeys refer to.
///
/// When ids repeat, the first record in document order wins.
pub struct RecordIndex<'a> {
    patterns: HashMap<&'a str, &'a Element>,
    sections: HashMap<&'a str, &'a Element>,
}

impl<'a> RecordIndex<'a> {
    pub fn build(root: &'a Element) -> Self {
        Self {
            patterns: index_by_id(root, "JourneyPattern"),
            sections: index_by_id(root, "JourneyPatternSection"),
        }
    }

    pub fn pattern(&self, id: &str) -> Result<&'a Element, ExtractError> {
        self.patterns
            .get(id)
            .copied()
            .ok_or_else(|| ExtractError::UnresolvedReference {
                kind: "JourneyPattern",
                id: id.to_string(),
            })
    }

    pub fn section(&self, id: &str) -> Result<&'a Element, ExtractError> {
        self.sections
            .get(id)
            .copied()
            .ok_or_else(|| ExtractError::UnresolvedReference {
                kind: "JourneyPatternSection",
                id: id.to_string(),
            })
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }
}

fn index_by_id<'a>(root: &'a Element, name: &str) -> HashMap<&'a str, &'a Element> {
    let mut index = HashMap::new();
    for element in root.txc_descendants(name) {
        if let Some(id) = element.attr("id") {
            index.entry(id).or_insert(element);
        }
    }
    index
}
