//! Loan domain model.
//!
//! # Responsibility
//! - Record which book was handed to which reader, and when.
//! - Own the open -> returned transition and its one-shot guard.
//!
//! # Invariants
//! - A loan never owns its book or reader; it holds handles that the
//!   catalog resolves at access time.
//! - `returned_at` is set at most once and is never earlier than
//!   `issued_at`.

use crate::model::book::BookHandle;
use crate::model::reader::ReaderHandle;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a loan record.
pub type LoanId = Uuid;

/// Shown in place of a return time while the loan is open.
pub const NOT_YET_RETURNED: &str = "not yet returned";
/// Shown when the loaned book is no longer in the catalog.
pub const MISSING_BOOK: &str = "<book no longer in catalog>";
/// Shown when the borrowing reader is no longer registered.
pub const MISSING_READER: &str = "<reader no longer registered>";

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Failure modes for loan creation and completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoanError {
    /// Book handle does not resolve in the catalog.
    BookNotFound(BookHandle),
    /// Book exists but is already on loan.
    BookUnavailable(BookHandle),
    /// Reader handle does not resolve in the catalog.
    ReaderNotFound(ReaderHandle),
    /// Catalog holds no open loan with this id, e.g. a stale copy of a
    /// loan that was already completed.
    NotOpen(LoanId),
    /// Loan was already completed.
    AlreadyReturned {
        loan: LoanId,
        returned_at: DateTime<Utc>,
    },
}

impl Display for LoanError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BookNotFound(handle) => write!(f, "book not found: {handle}"),
            Self::BookUnavailable(handle) => write!(f, "book is on loan: {handle}"),
            Self::ReaderNotFound(handle) => write!(f, "reader not found: {handle}"),
            Self::NotOpen(loan) => write!(f, "loan {loan} is not open in this catalog"),
            Self::AlreadyReturned { loan, returned_at } => write!(
                f,
                "loan {loan} already returned at {}",
                returned_at.format(TIME_FORMAT)
            ),
        }
    }
}

impl Error for LoanError {}

/// Time-stamped association between one book and one reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    id: LoanId,
    book: BookHandle,
    reader: ReaderHandle,
    issued_at: DateTime<Utc>,
    returned_at: Option<DateTime<Utc>>,
}

impl Loan {
    /// Opens a loan stamped with `issued_at`.
    ///
    /// Only the catalog opens loans, after checking both handles resolve.
    pub(crate) fn open(book: BookHandle, reader: ReaderHandle, issued_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            book,
            reader,
            issued_at,
            returned_at: None,
        }
    }

    /// Moves the loan to its terminal returned state.
    ///
    /// `now` is clamped to `issued_at` so a wall clock stepping backwards
    /// cannot produce a return before the issue.
    ///
    /// # Errors
    /// - `LoanError::AlreadyReturned` when the loan is already closed; the
    ///   recorded return time is left untouched.
    pub(crate) fn close(&mut self, now: DateTime<Utc>) -> Result<DateTime<Utc>, LoanError> {
        if let Some(returned_at) = self.returned_at {
            return Err(LoanError::AlreadyReturned {
                loan: self.id,
                returned_at,
            });
        }
        let returned_at = now.max(self.issued_at);
        self.returned_at = Some(returned_at);
        Ok(returned_at)
    }

    pub fn id(&self) -> LoanId {
        self.id
    }

    pub fn book(&self) -> BookHandle {
        self.book
    }

    pub fn reader(&self) -> ReaderHandle {
        self.reader
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn returned_at(&self) -> Option<DateTime<Utc>> {
        self.returned_at
    }

    /// Returns whether the book is still out.
    pub fn is_open(&self) -> bool {
        self.returned_at.is_none()
    }
}

/// Loan view with its references resolved against a catalog.
///
/// `None` title/name means the referenced entity is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanDetails {
    pub loan: LoanId,
    pub book_title: Option<String>,
    pub reader_name: Option<String>,
    pub issued_at: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
}

impl Display for LoanDetails {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let returned = match self.returned_at {
            Some(at) => at.format(TIME_FORMAT).to_string(),
            None => NOT_YET_RETURNED.to_string(),
        };
        write!(
            f,
            "Book: {}, Reader: {}, Issued: {}, Returned: {}",
            self.book_title.as_deref().unwrap_or(MISSING_BOOK),
            self.reader_name.as_deref().unwrap_or(MISSING_READER),
            self.issued_at.format(TIME_FORMAT),
            returned
        )
    }
}
