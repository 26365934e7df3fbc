//! Book domain model.
//!
//! # Responsibility
//! - Define the catalog entry record and its availability flag.
//! - Provide the loaned/returned status transitions.
//!
//! # Invariants
//! - `handle` is stable and never reused for another book; stores reassign
//!   a colliding handle on insert.
//! - `available` starts as `true` and only changes through
//!   `mark_as_loaned` / `mark_as_available`.
//! - `isbn` is an identifier but is not guaranteed unique.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identity of one book inside a catalog.
///
/// Loans refer to books through this handle because `isbn` may repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookHandle(Uuid);

impl BookHandle {
    /// Generates a fresh random handle.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BookHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for BookHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    handle: BookHandle,
    title: String,
    author: String,
    isbn: String,
    available: bool,
}

impl Book {
    /// Creates an available book with a generated handle.
    ///
    /// No field is validated: empty strings and repeated isbn values are
    /// accepted.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Self {
        Self {
            handle: BookHandle::new(),
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            available: true,
        }
    }

    pub fn handle(&self) -> BookHandle {
        self.handle
    }

    /// Gives the book a fresh handle. Used by stores when an inserted book
    /// (e.g. a deserialized copy) collides with one already held.
    pub(crate) fn reassign_handle(&mut self) {
        self.handle = BookHandle::new();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    /// Returns whether this book can be handed to a reader.
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Flags the book as handed out. Does not check the current state.
    pub fn mark_as_loaned(&mut self) {
        self.available = false;
    }

    /// Flags the book as back on the shelf.
    pub fn mark_as_available(&mut self) {
        self.available = true;
    }
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let status = if self.available {
            "available"
        } else {
            "on loan"
        };
        write!(
            f,
            "Title: {}, Author: {}, ISBN: {}, Status: {}",
            self.title, self.author, self.isbn, status
        )
    }
}
