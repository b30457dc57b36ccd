//! Dataset catalogue DTOs.
//!
//! These types map directly to the entries of the dataset API response that
//! was saved as the catalogue snapshot. Every field is optional because a
//! malformed entry must be skipped, not fail the whole snapshot.

use std::fmt;

use serde::Deserialize;

/// The saved API response: only `results` is read.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogueSnapshot {
    /// Raw entries, decoded one by one so a bad entry can be dropped alone.
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
}

/// One dataset published by an operator.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueEntry {
    /// Dataset identifier, used to build the stored file name.
    pub id: Option<DatasetId>,

    /// Operator publishing the dataset.
    pub operator_name: Option<String>,

    /// Line names covered by the dataset. The first one names flat documents.
    pub lines: Option<Vec<String>>,

    /// File kind: "zip" for a nested archive, "xml" for a single document.
    pub extension: Option<String>,

    /// Localities served by the dataset's routes.
    pub localities: Option<Vec<Locality>>,
}

/// A locality entry inside a catalogue record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Locality {
    /// National gazetteer identifier of the locality.
    pub gazetteer_id: Option<String>,

    /// Human-readable locality name.
    pub locality_name: Option<String>,
}

/// Dataset id. The API emits integers, older snapshots have strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum DatasetId {
    Number(u64),
    Text(String),
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetId::Number(n) => write!(f, "{n}"),
            DatasetId::Text(s) => f.write_str(s),
        }
    }
}
