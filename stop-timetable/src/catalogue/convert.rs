//! Conversion from catalogue DTOs to validated datasets.

use crate::domain::LocalityId;

use super::types::{CatalogueEntry, DatasetId};

/// Error during DTO to dataset conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidEntry {
    /// A field the file naming or matching depends on is absent
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// How a dataset is stored inside the outer container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileKind {
    /// A nested archive of schedule documents (`zip`).
    Archive,
    /// A single schedule document (`xml`).
    Document,
    /// Any other extension; matched but never stored.
    Other(String),
}

impl FileKind {
    fn from_extension(extension: &str) -> Self {
        match extension {
            "zip" => FileKind::Archive,
            "xml" => FileKind::Document,
            other => FileKind::Other(other.to_string()),
        }
    }
}

/// A catalogue entry with every field the locator needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub id: DatasetId,
    pub operator: String,
    pub lines: Vec<String>,
    pub kind: FileKind,
    /// Gazetteer ids in catalogue order, cut at the first locality without one.
    pub localities: Vec<String>,
}

impl Dataset {
    /// Whether any of the dataset's localities is `locality`.
    pub fn serves(&self, locality: &LocalityId) -> bool {
        self.localities.iter().any(|l| l == locality.as_str())
    }

    /// Name of the file holding this dataset inside the outer container.
    ///
    /// Archives are stored as `<operator>_<id>.zip` and single documents as
    /// `<operator>_<id>_<first line>.xml`. Other kinds have no stored file.
    pub fn file_name(&self) -> Option<String> {
        match &self.kind {
            FileKind::Archive => Some(format!("{}_{}.zip", self.operator, self.id)),
            // Conversion guarantees at least one line for documents.
            FileKind::Document => self
                .lines
                .first()
                .map(|line| format!("{}_{}_{}.xml", self.operator, self.id, line)),
            FileKind::Other(_) => None,
        }
    }

    /// Deduplication key: one dataset per operator and line set.
    pub fn key(&self) -> (String, Vec<String>) {
        (self.operator.clone(), self.lines.clone())
    }
}

impl TryFrom<&CatalogueEntry> for Dataset {
    type Error = InvalidEntry;

    fn try_from(entry: &CatalogueEntry) -> Result<Self, Self::Error> {
        let operator = entry
            .operator_name
            .clone()
            .ok_or(InvalidEntry::MissingField("operatorName"))?;
        let lines = entry
            .lines
            .clone()
            .ok_or(InvalidEntry::MissingField("lines"))?;
        let id = entry.id.clone().ok_or(InvalidEntry::MissingField("id"))?;
        let extension = entry
            .extension
            .as_deref()
            .ok_or(InvalidEntry::MissingField("extension"))?;
        let kind = FileKind::from_extension(extension);

        if kind == FileKind::Document && lines.is_empty() {
            return Err(InvalidEntry::MissingField("lines[0]"));
        }

        // Localities are matched in order, so one without an id only hides
        // the ones after it.
        let localities = entry
            .localities
            .as_deref()
            .ok_or(InvalidEntry::MissingField("localities"))?
            .iter()
            .map_while(|l| l.gazetteer_id.clone())
            .collect();

        Ok(Dataset {
            id,
            operator,
            lines,
            kind,
            localities,
        })
    }
}
