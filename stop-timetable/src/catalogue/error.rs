//! Catalogue snapshot error types.

/// Errors that can occur when loading a catalogue snapshot.
#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    /// Snapshot file could not be read
    #[error("failed to read catalogue snapshot: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot is not the expected JSON document
    #[error("catalogue JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
