//! A container held as plain name/bytes pairs.

use std::collections::HashMap;

use super::error::ArchiveError;
use super::Container;

/// In-memory container, mostly for tests and pre-extracted bundles.
///
/// Nested archives are stored as ZIP bytes like any other entry and opened
/// through the default [`Container::open_nested`].
#[derive(Debug, Default, Clone)]
pub struct MemoryContainer {
    order: Vec<String>,
    entries: HashMap<String, Vec<u8>>,
    reads: HashMap<String, usize>,
}

impl MemoryContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry. A new name goes to the end of the listing.
    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        let name = name.into();
        if !self.entries.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.entries.insert(name, bytes.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_entry(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(name, bytes);
        self
    }

    /// How many times `name` has been read.
    pub fn read_count(&self, name: &str) -> usize {
        self.reads.get(name).copied().unwrap_or(0)
    }
}

impl Container for MemoryContainer {
    fn entry_names(&self) -> Vec<String> {
        self.order.clone()
    }

    fn read_entry(&mut self, name: &str) -> Result<Vec<u8>, ArchiveError> {
        let bytes = self
            .entries
            .get(name)
            .ok_or_else(|| ArchiveError::EntryNotFound(name.to_string()))?;
        *self.reads.entry(name.to_string()).or_default() += 1;
        Ok(bytes.clone())
    }
}
