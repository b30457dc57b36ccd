//! Container access error types.

/// Errors from opening or reading a container.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    /// Underlying read failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bytes are not a readable ZIP archive
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// No entry with this name
    #[error("entry not found: {0}")]
    EntryNotFound(String),

    /// Entry would decompress past the size limit
    #[error("entry {name} is {size} bytes, over the {limit} byte limit")]
    EntryTooLarge { name: String, size: u64, limit: u64 },
}
