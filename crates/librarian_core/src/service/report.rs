//! Human-readable catalog events and their sinks.
//!
//! # Responsibility
//! - Name every event the catalog reports to its console surface.
//! - Provide the `Reporter` seam plus stdout, silent and recording sinks.
//!
//! # Invariants
//! - Each state change or lookup outcome produces exactly one event.
//! - Reporters never influence catalog state.

use crate::model::loan::{LoanDetails, LoanError};
use crate::model::reader::ReaderId;
use std::cell::RefCell;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// One reportable catalog event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEvent {
    BookAdded { title: String },
    BookRemoved { count: usize },
    /// Covers both "no such isbn" and "every match is on loan".
    BookNotFoundOrOnLoan { isbn: String },
    ReaderAdded { name: String },
    ReaderRemoved { count: usize },
    ReaderNotFound { id: ReaderId },
    LoanCreated(LoanDetails),
    LoanCompleted(LoanDetails),
    BookUnavailable { title: String },
    /// Loan could not be opened because a handle did not resolve.
    LoanRefused(LoanError),
    /// Loan could not be completed.
    ReturnRefused(LoanError),
}

impl Display for CatalogEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BookAdded { title } => write!(f, "Book '{title}' added."),
            Self::BookRemoved { count } => write!(f, "Book removed ({count} copies)."),
            Self::BookNotFoundOrOnLoan { .. } => {
                write!(f, "Book not found or currently on loan.")
            }
            Self::ReaderAdded { name } => write!(f, "Reader '{name}' added."),
            Self::ReaderRemoved { .. } => write!(f, "Reader removed."),
            Self::ReaderNotFound { id } => write!(f, "Reader with ID {id} not found."),
            Self::LoanCreated(details) => write!(f, "Loan created: {details}"),
            Self::LoanCompleted(details) => write!(f, "Loan completed: {details}"),
            Self::BookUnavailable { .. } => write!(f, "Book is not available for loan."),
            Self::LoanRefused(err) => write!(f, "Loan refused: {err}."),
            Self::ReturnRefused(err) => write!(f, "Return refused: {err}."),
        }
    }
}

/// Sink for catalog events.
pub trait Reporter {
    fn report(&self, event: &CatalogEvent);
}

/// Drops every event. Default for catalogs built without a sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn report(&self, _event: &CatalogEvent) {}
}

/// Prints one line per event to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, event: &CatalogEvent) {
        println!("{event}");
    }
}

/// Records events in memory.
///
/// Clones share one buffer, so a test can keep a clone while the catalog
/// owns another.
#[derive(Debug, Default, Clone)]
pub struct MemoryReporter {
    events: Rc<RefCell<Vec<CatalogEvent>>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every event recorded so far.
    pub fn events(&self) -> Vec<CatalogEvent> {
        self.events.borrow().clone()
    }

    /// Returns recorded events rendered as console lines.
    pub fn lines(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, event: &CatalogEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
