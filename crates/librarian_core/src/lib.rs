//! Core domain logic for Librarian.
//! This crate is the single source of truth for catalog invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, LogSettings, LoggingError, CATALOG_LOG_TARGET};
pub use model::book::{Book, BookHandle};
pub use model::loan::{
    Loan, LoanDetails, LoanError, LoanId, MISSING_BOOK, MISSING_READER, NOT_YET_RETURNED,
};
pub use model::reader::{Reader, ReaderHandle, ReaderId};
pub use repo::book_repo::{BookRepository, InMemoryBookRepository};
pub use repo::reader_repo::{InMemoryReaderRepository, ReaderRepository};
pub use service::catalog_service::{Catalog, LendOutcome, RemoveBookOutcome, RemoveReaderOutcome};
pub use service::report::{CatalogEvent, ConsoleReporter, MemoryReporter, Reporter, SilentReporter};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
