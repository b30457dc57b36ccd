//! Per-stop timetable output types.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::ClockTime;

/// Arrival times at one stop, grouped by the destination shown on the bus.
///
/// Destinations keep the order in which they were first seen, and each
/// destination's times keep the order in which journeys produced them.
/// Times are not sorted: journeys are visited in document order, not
/// departure order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrivalTimes {
    by_destination: Vec<(String, Vec<ClockTime>)>,
}

impl ArrivalTimes {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one arrival under `destination`.
    pub fn push(&mut self, destination: &str, time: ClockTime) {
        match self
            .by_destination
            .iter_mut()
            .find(|(name, _)| name == destination)
        {
            Some((_, times)) => times.push(time),
            None => self
                .by_destination
                .push((destination.to_string(), vec![time])),
        }
    }

    /// Arrival times recorded for a destination.
    pub fn get(&self, destination: &str) -> Option<&[ClockTime]> {
        self.by_destination
            .iter()
            .find(|(name, _)| name == destination)
            .map(|(_, times)| times.as_slice())
    }

    /// Iterate destinations and their times in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ClockTime])> {
        self.by_destination
            .iter()
            .map(|(name, times)| (name.as_str(), times.as_slice()))
    }

    /// Destinations in first-seen order.
    pub fn destinations(&self) -> impl Iterator<Item = &str> {
        self.by_destination.iter().map(|(name, _)| name.as_str())
    }

    /// Number of distinct destinations.
    pub fn len(&self) -> usize {
        self.by_destination.len()
    }

    /// True when no arrival has been recorded.
    pub fn is_empty(&self) -> bool {
        self.by_destination.is_empty()
    }

    /// Total number of arrival times across all destinations.
    pub fn arrival_count(&self) -> usize {
        self.by_destination.iter().map(|(_, t)| t.len()).sum()
    }
}

impl Serialize for ArrivalTimes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.by_destination.len()))?;
        for (destination, times) in &self.by_destination {
            map.serialize_entry(destination, times)?;
        }
        map.end()
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One line's contribution to a stop's timetable.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TimetableEntry {
    pub line: String,
    pub arrival_times: ArrivalTimes,
}

impl TimetableEntry {
    pub fn new(line: impl Into<String>, arrival_times: ArrivalTimes) -> Self {
        Self {
            line: line.into(),
            arrival_times,
        }
    }
}
