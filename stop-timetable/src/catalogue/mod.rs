//! Dataset catalogue snapshot and archive location.
//!
//! The catalogue is the saved response of the bus open data API listing
//! every dataset published for the area. Each dataset is stored in the
//! outer container under a name derived from its operator, id and lines;
//! `locate` picks the stored files worth opening for a given locality.

mod convert;
mod error;
mod locate;
mod types;

use std::path::Path;

use tracing::{info, warn};

pub use convert::{Dataset, FileKind, InvalidEntry};
pub use error::CatalogueError;
pub use locate::{LocatedFiles, locate};
pub use types::{CatalogueEntry, CatalogueSnapshot, DatasetId, Locality};

use crate::domain::LocalityId;

/// The loaded catalogue, in the order the API listed it.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    entries: Vec<CatalogueEntry>,
}

impl Catalogue {
    /// Wrap already-decoded entries.
    pub fn new(entries: Vec<CatalogueEntry>) -> Self {
        Self { entries }
    }

    /// Decode a snapshot from its JSON text.
    ///
    /// Entries whose shape does not match (e.g. `lines` given as a string)
    /// are dropped with a warning; the rest of the snapshot still loads.
    pub fn from_json(json: &str) -> Result<Self, CatalogueError> {
        let snapshot: CatalogueSnapshot = serde_json::from_str(json)?;
        let total = snapshot.results.len();

        let entries: Vec<CatalogueEntry> = snapshot
            .results
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(index, error = %e, "dropping undecodable catalogue entry");
                    None
                }
            })
            .collect();

        info!(
            entries = entries.len(),
            dropped = total - entries.len(),
            "loaded catalogue snapshot"
        );

        Ok(Self { entries })
    }

    /// Read and decode a snapshot file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogueError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&contents)
    }

    /// Entries in catalogue order.
    pub fn entries(&self) -> &[CatalogueEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Files relevant to `locality`. See [`locate`].
    pub fn locate(&self, locality: &LocalityId) -> LocatedFiles {
        locate(&self.entries, locality)
    }
}
