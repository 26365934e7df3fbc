//! Reader (patron) domain model.
//!
//! Readers are immutable once created. `id` is the caller-facing number and
//! may repeat; `handle` is the stable identity loans hold on to.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Numeric reader id as supplied by the caller.
pub type ReaderId = i64;

/// Stable identity of one registered reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReaderHandle(Uuid);

impl ReaderHandle {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ReaderHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ReaderHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered patron.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reader {
    handle: ReaderHandle,
    id: ReaderId,
    name: String,
    email: String,
}

impl Reader {
    /// Creates a reader with a generated handle. Inputs are not validated.
    pub fn new(id: ReaderId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            handle: ReaderHandle::new(),
            id,
            name: name.into(),
            email: email.into(),
        }
    }

    pub fn handle(&self) -> ReaderHandle {
        self.handle
    }

    pub(crate) fn reassign_handle(&mut self) {
        self.handle = ReaderHandle::new();
    }

    pub fn id(&self) -> ReaderId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl Display for Reader {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Reader: {} (ID: {}, Email: {})",
            self.name, self.id, self.email
        )
    }
}
