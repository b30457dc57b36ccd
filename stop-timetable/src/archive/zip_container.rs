//! ZIP-backed containers.

use std::io::{Cursor, Read, Seek};

use tracing::trace;
use zip::ZipArchive;
use zip::result::ZipError;

use super::error::ArchiveError;
use super::Container;

/// Largest single entry we will decompress (512 MB).
pub const MAX_ENTRY_SIZE: u64 = 512 * 1024 * 1024;

/// A ZIP archive opened as a container.
pub struct ZipContainer<R> {
    archive: ZipArchive<R>,
    names: Vec<String>,
    max_entry_size: u64,
}

impl<R: Read + Seek> ZipContainer<R> {
    /// Open an archive from any seekable reader.
    pub fn new(reader: R) -> Result<Self, ArchiveError> {
        let archive = ZipArchive::new(reader)?;

        // Central directory order, directories left out
        let names = (0..archive.len())
            .filter_map(|i| archive.name_for_index(i))
            .filter(|name| !name.ends_with('/'))
            .map(str::to_owned)
            .collect();

        Ok(Self {
            archive,
            names,
            max_entry_size: MAX_ENTRY_SIZE,
        })
    }

    /// Override the per-entry size limit.
    pub fn with_max_entry_size(mut self, limit: u64) -> Self {
        self.max_entry_size = limit;
        self
    }
}

impl ZipContainer<Cursor<Vec<u8>>> {
    /// Open an archive held in memory.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ArchiveError> {
        Self::new(Cursor::new(bytes))
    }
}

impl<R: Read + Seek> Container for ZipContainer<R> {
    fn entry_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn read_entry(&mut self, name: &str) -> Result<Vec<u8>, ArchiveError> {
        let file = self.archive.by_name(name).map_err(|e| match e {
            ZipError::FileNotFound => ArchiveError::EntryNotFound(name.to_string()),
            other => ArchiveError::Zip(other),
        })?;

        let size = file.size();
        if size > self.max_entry_size {
            return Err(ArchiveError::EntryTooLarge {
                name: name.to_string(),
                size,
                limit: self.max_entry_size,
            });
        }

        // The header size can lie; never read past the limit either way.
        let mut bytes = Vec::with_capacity(size as usize);
        file.take(self.max_entry_size + 1).read_to_end(&mut bytes)?;
        if bytes.len() as u64 > self.max_entry_size {
            return Err(ArchiveError::EntryTooLarge {
                name: name.to_string(),
                size: bytes.len() as u64,
                limit: self.max_entry_size,
            });
        }

        trace!(entry = name, bytes = bytes.len(), "read container entry");
        Ok(bytes)
    }
}
