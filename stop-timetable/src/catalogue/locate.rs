//! Selection of the stored files relevant to one locality.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::domain::LocalityId;

use super::convert::{Dataset, FileKind};
use super::types::CatalogueEntry;

/// Files in the outer container that may hold schedules for a locality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocatedFiles {
    /// Single schedule documents (`<operator>_<id>_<line>.xml`).
    pub documents: Vec<String>,
    /// Nested per-operator archives (`<operator>_<id>.zip`).
    pub archives: Vec<String>,
}

impl LocatedFiles {
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty() && self.archives.is_empty()
    }

    pub fn len(&self) -> usize {
        self.documents.len() + self.archives.len()
    }
}

/// Pick the files serving `locality` from the catalogue.
///
/// The catalogue is walked newest-first (reverse of its order), and only the
/// first dataset seen for each (operator, line set) pair is taken, so an
/// older republication of the same lines never shadows the newer one.
/// Entries missing required fields are skipped.
pub fn locate(catalogue: &[CatalogueEntry], locality: &LocalityId) -> LocatedFiles {
    let mut located = LocatedFiles::default();
    let mut accepted: HashSet<(String, Vec<String>)> = HashSet::new();

    for entry in catalogue.iter().rev() {
        let dataset = match Dataset::try_from(entry) {
            Ok(dataset) => dataset,
            Err(e) => {
                debug!(error = %e, "skipping malformed catalogue entry");
                continue;
            }
        };

        let key = dataset.key();
        if accepted.contains(&key) {
            trace!(operator = %dataset.operator, id = %dataset.id, "already have these lines");
            continue;
        }

        if !dataset.serves(locality) {
            continue;
        }

        // Unknown kinds still match the locality, but store nothing.
        let Some(file_name) = dataset.file_name() else {
            debug!(
                operator = %dataset.operator,
                id = %dataset.id,
                kind = ?dataset.kind,
                "matched dataset has no stored file"
            );
            continue;
        };

        match dataset.kind {
            FileKind::Archive => located.archives.push(file_name),
            FileKind::Document => located.documents.push(file_name),
            FileKind::Other(_) => continue,
        }
        accepted.insert(key);
    }

    debug!(
        locality = %locality,
        documents = located.documents.len(),
        archives = located.archives.len(),
        "located candidate files"
    );

    located
}
