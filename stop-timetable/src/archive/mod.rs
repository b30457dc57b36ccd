//! Named-entry containers: the outer schedule bundle and the operator
//! archives nested inside it.

mod error;
mod memory;
mod zip_container;

pub use error::ArchiveError;
pub use memory::MemoryContainer;
pub use zip_container::{MAX_ENTRY_SIZE, ZipContainer};

/// Something holding byte blobs by name.
///
/// Entry names come back in the order the container lists them, which the
/// aggregator relies on when it walks nested archives.
pub trait Container {
    /// Entry names in listed order.
    fn entry_names(&self) -> Vec<String>;

    /// Full contents of one entry.
    fn read_entry(&mut self, name: &str) -> Result<Vec<u8>, ArchiveError>;

    /// Open an entry that is itself a ZIP archive.
    fn open_nested(&mut self, name: &str) -> Result<Box<dyn Container>, ArchiveError> {
        let bytes = self.read_entry(name)?;
        Ok(Box::new(ZipContainer::from_bytes(bytes)?))
    }
}

/// Build an in-memory ZIP from (name, bytes) pairs, in order.
#[cfg(test)]
pub(crate) fn test_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    use std::io::{Cursor, Write};

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, bytes) in entries {
        writer
            .start_file(*name, zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap().into_inner()
}
