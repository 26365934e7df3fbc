//! Reader storage contract and in-memory implementation.
//!
//! Same shape as the book store: insertion order preserved, duplicate ids
//! accepted, lookups by stable `ReaderHandle`, colliding handles replaced
//! on insert.

use crate::model::reader::{Reader, ReaderHandle};

/// Storage interface for registered readers.
pub trait ReaderRepository {
    fn insert(&mut self, reader: Reader) -> ReaderHandle;
    fn get(&self, handle: ReaderHandle) -> Option<&Reader>;
    fn all(&self) -> &[Reader];
    /// Removes every reader matching `predicate` and returns how many were removed.
    fn remove_where(&mut self, predicate: &dyn Fn(&Reader) -> bool) -> usize;
}

/// Vec-backed reader storage.
#[derive(Debug, Default, Clone)]
pub struct InMemoryReaderRepository {
    readers: Vec<Reader>,
}

impl InMemoryReaderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReaderRepository for InMemoryReaderRepository {
    fn insert(&mut self, mut reader: Reader) -> ReaderHandle {
        while self.get(reader.handle()).is_some() {
            reader.reassign_handle();
        }
        let handle = reader.handle();
        self.readers.push(reader);
        handle
    }

    fn get(&self, handle: ReaderHandle) -> Option<&Reader> {
        self.readers.iter().find(|reader| reader.handle() == handle)
    }

    fn all(&self) -> &[Reader] {
        &self.readers
    }

    fn remove_where(&mut self, predicate: &dyn Fn(&Reader) -> bool) -> usize {
        let before = self.readers.len();
        self.readers.retain(|reader| !predicate(reader));
        before - self.readers.len()
    }
}
