//! Building a stop's timetable from the schedule bundle.
//!
//! The outer container holds two kinds of file: single schedule documents
//! and per-operator archives of documents. The catalogue decides which of
//! them matter for a locality; this module reads those and collects one
//! [`TimetableEntry`] per line that actually calls at the stop.

use std::collections::HashSet;

use tracing::{debug, info, trace, warn};

use crate::archive::{ArchiveError, Container, ZipContainer};
use crate::catalogue::{CatalogueEntry, LocatedFiles, locate};
use crate::domain::{ArrivalTimes, StopCode, StopIdentity, TimetableEntry};
use crate::transxchange::ScheduleDocument;

/// Build the timetable for `stop` from raw container bytes.
///
/// Fails only when the container itself cannot be opened. Missing entries,
/// broken nested archives and unreadable documents are skipped.
pub fn build_timetable(
    container: Vec<u8>,
    stop: &StopIdentity,
    catalogue: &[CatalogueEntry],
) -> Result<Vec<TimetableEntry>, ArchiveError> {
    let mut container = ZipContainer::from_bytes(container)?;
    Ok(build_timetable_from(&mut container, stop, catalogue))
}

/// Build the timetable for `stop` from an already opened container.
///
/// Entries from single documents come first, in catalogue selection order,
/// followed by entries from nested archives.
pub fn build_timetable_from(
    container: &mut dyn Container,
    stop: &StopIdentity,
    catalogue: &[CatalogueEntry],
) -> Vec<TimetableEntry> {
    let LocatedFiles { documents, archives } = locate(catalogue, &stop.locality);
    info!(
        stop = %stop.code,
        locality = %stop.locality,
        documents = documents.len(),
        archives = archives.len(),
        "located candidate files"
    );

    let mut entries = Vec::new();

    for name in &documents {
        if let Some(entry) = read_document(container, name, &stop.code) {
            entries.push(entry);
        }
    }

    for name in &archives {
        let mut nested = match container.open_nested(name) {
            Ok(nested) => nested,
            Err(e) => {
                warn!(archive = %name, error = %e, "skipping unreadable archive");
                continue;
            }
        };
        entries.extend(scan_archive(nested.as_mut(), name, &stop.code));
    }

    info!(stop = %stop.code, lines = entries.len(), "timetable built");
    entries
}

/// One single-document file: its entry, if the line calls at `stop`.
fn read_document(
    container: &mut dyn Container,
    name: &str,
    stop: &StopCode,
) -> Option<TimetableEntry> {
    let bytes = match container.read_entry(name) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(file = %name, error = %e, "skipping unreadable document");
            return None;
        }
    };

    let document = parse(name, &bytes)?;
    let arrivals = document.extract(stop);
    if arrivals.is_empty() {
        return None;
    }

    match document.line_name() {
        Ok(line) => Some(TimetableEntry::new(line, arrivals)),
        Err(e) => {
            debug!(file = %name, error = %e, "discarding unnamed schedule");
            None
        }
    }
}

/// Every document in a nested archive, last listed first.
///
/// Once a line has produced arrivals, later documents for the same line in
/// this archive are not read past their line name.
fn scan_archive(
    archive: &mut dyn Container,
    archive_name: &str,
    stop: &StopCode,
) -> Vec<TimetableEntry> {
    scan_archive_with(archive, archive_name, stop, ScheduleDocument::extract)
}

fn scan_archive_with(
    archive: &mut dyn Container,
    archive_name: &str,
    stop: &StopCode,
    mut extract: impl FnMut(&ScheduleDocument, &StopCode) -> ArrivalTimes,
) -> Vec<TimetableEntry> {
    let mut entries = Vec::new();
    let mut checked_lines: HashSet<String> = HashSet::new();

    for name in archive.entry_names().into_iter().rev() {
        let bytes = match archive.read_entry(&name) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(
                    archive = %archive_name,
                    file = %name,
                    error = %e,
                    "skipping unreadable entry"
                );
                continue;
            }
        };
        let Some(document) = parse(&name, &bytes) else {
            continue;
        };

        let line = match document.line_name() {
            Ok(line) => line,
            Err(e) => {
                debug!(
                    archive = %archive_name,
                    file = %name,
                    error = %e,
                    "discarding unnamed schedule"
                );
                continue;
            }
        };
        if checked_lines.contains(&line) {
            trace!(archive = %archive_name, file = %name, line = %line, "line already found");
            continue;
        }

        let arrivals = extract(&document, stop);
        if arrivals.is_empty() {
            continue;
        }

        checked_lines.insert(line.clone());
        entries.push(TimetableEntry::new(line, arrivals));
    }

    entries
}

fn parse(name: &str, bytes: &[u8]) -> Option<ScheduleDocument> {
    ScheduleDocument::parse(bytes)
        .inspect_err(|e| debug!(file = %name, error = %e, "discarding unparsable schedule"))
        .ok()
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
