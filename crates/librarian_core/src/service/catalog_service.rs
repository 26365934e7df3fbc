//! Catalog coordinator.
//!
//! # Responsibility
//! - Own the book and reader stores and be their only mutator.
//! - Open and complete loans, resolving handles through the stores.
//! - Report one human-readable event per state change or lookup outcome.
//!
//! # Invariants
//! - A book is only removed while available.
//! - `remove_book` / `remove_reader` remove every match, not just the first.
//! - isbn and reader id uniqueness are not enforced.
//! - Only loans opened by this catalog and still open can be completed.
//! - Stale loan references resolve to an explicit "gone" result and are
//!   never dereferenced.
//! - Log lines carry handles and counts only, never titles, names or emails.

use crate::logging::CATALOG_LOG_TARGET;
use crate::model::book::{Book, BookHandle};
use crate::model::loan::{Loan, LoanDetails, LoanError, LoanId};
use crate::model::reader::{Reader, ReaderHandle, ReaderId};
use crate::repo::book_repo::{BookRepository, InMemoryBookRepository};
use crate::repo::reader_repo::{InMemoryReaderRepository, ReaderRepository};
use crate::service::report::{CatalogEvent, Reporter, SilentReporter};
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::collections::HashSet;
use std::fmt::{Debug, Formatter};

/// Result of `Catalog::remove_book`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveBookOutcome {
    /// Number of available copies removed (always >= 1).
    Removed(usize),
    /// No book carries the isbn.
    NotFound,
    /// Matching books exist but all are on loan; nothing was removed.
    OnLoan,
}

/// Result of `Catalog::remove_reader`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveReaderOutcome {
    Removed(usize),
    NotFound,
}

/// Result of `Catalog::lend_book`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LendOutcome {
    Created(Loan),
    /// No book has the title, or the first one found is on loan.
    BookUnavailable,
    ReaderNotFound(ReaderId),
}

/// Owning collection of books and readers plus their operations.
pub struct Catalog<B = InMemoryBookRepository, R = InMemoryReaderRepository>
where
    B: BookRepository,
    R: ReaderRepository,
{
    books: B,
    readers: R,
    open_loans: HashSet<LoanId>,
    reporter: Box<dyn Reporter>,
}

impl<B, R> Debug for Catalog<B, R>
where
    B: BookRepository,
    R: ReaderRepository,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("books", &self.books.all())
            .field("readers", &self.readers.all())
            .field("open_loans", &self.open_loans.len())
            .finish_non_exhaustive()
    }
}

impl Catalog {
    /// Creates an empty in-memory catalog that reports nothing.
    pub fn new() -> Self {
        Self::with_repositories(
            InMemoryBookRepository::new(),
            InMemoryReaderRepository::new(),
        )
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl<B, R> Catalog<B, R>
where
    B: BookRepository,
    R: ReaderRepository,
{
    /// Creates a catalog over caller-provided stores.
    pub fn with_repositories(books: B, readers: R) -> Self {
        Self {
            books,
            readers,
            open_loans: HashSet::new(),
            reporter: Box::new(SilentReporter),
        }
    }

    /// Replaces the event sink.
    pub fn with_reporter(mut self, reporter: impl Reporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    fn emit(&self, event: CatalogEvent) {
        self.reporter.report(&event);
    }

    /// Appends a book. Always succeeds.
    pub fn add_book(&mut self, book: Book) -> BookHandle {
        let title = book.title().to_string();
        let handle = self.books.insert(book);
        info!(target: CATALOG_LOG_TARGET, "event=book_add module=catalog status=ok handle={handle}");
        self.emit(CatalogEvent::BookAdded { title });
        handle
    }

    /// Removes every available book carrying `isbn`.
    ///
    /// Copies on loan are kept. When matches exist but none is available
    /// the call is refused with `OnLoan`.
    pub fn remove_book(&mut self, isbn: &str) -> RemoveBookOutcome {
        let matches = self
            .books
            .all()
            .iter()
            .filter(|book| book.isbn() == isbn)
            .count();
        let removed = self
            .books
            .remove_where(&|book| book.isbn() == isbn && book.is_available());

        let outcome = match (matches, removed) {
            (0, _) => RemoveBookOutcome::NotFound,
            (_, 0) => RemoveBookOutcome::OnLoan,
            (_, count) => RemoveBookOutcome::Removed(count),
        };

        match outcome {
            RemoveBookOutcome::Removed(count) => {
                info!(target: CATALOG_LOG_TARGET, "event=book_remove module=catalog status=ok removed={count}");
                self.emit(CatalogEvent::BookRemoved { count });
            }
            RemoveBookOutcome::NotFound | RemoveBookOutcome::OnLoan => {
                let status = if outcome == RemoveBookOutcome::NotFound {
                    "not_found"
                } else {
                    "on_loan"
                };
                info!(target: CATALOG_LOG_TARGET, "event=book_remove module=catalog status={status} matches={matches}");
                self.emit(CatalogEvent::BookNotFoundOrOnLoan {
                    isbn: isbn.to_string(),
                });
            }
        }
        outcome
    }

    /// Appends a reader. Always succeeds.
    pub fn add_reader(&mut self, reader: Reader) -> ReaderHandle {
        let name = reader.name().to_string();
        let handle = self.readers.insert(reader);
        info!(target: CATALOG_LOG_TARGET, "event=reader_add module=catalog status=ok handle={handle}");
        self.emit(CatalogEvent::ReaderAdded { name });
        handle
    }

    /// Removes every reader with `id`. Open loans are not inspected.
    pub fn remove_reader(&mut self, id: ReaderId) -> RemoveReaderOutcome {
        let removed = self.readers.remove_where(&|reader| reader.id() == id);
        if removed == 0 {
            info!(target: CATALOG_LOG_TARGET, "event=reader_remove module=catalog status=not_found id={id}");
            self.emit(CatalogEvent::ReaderNotFound { id });
            return RemoveReaderOutcome::NotFound;
        }

        info!(target: CATALOG_LOG_TARGET, "event=reader_remove module=catalog status=ok id={id} removed={removed}");
        self.emit(CatalogEvent::ReaderRemoved { count: removed });
        RemoveReaderOutcome::Removed(removed)
    }

    /// Returns the first book whose title equals `title`.
    pub fn find_book_by_title(&self, title: &str) -> Option<&Book> {
        self.books.all().iter().find(|book| book.title() == title)
    }

    /// Returns the first book carrying `isbn`.
    pub fn find_book_by_isbn(&self, isbn: &str) -> Option<&Book> {
        self.books.all().iter().find(|book| book.isbn() == isbn)
    }

    /// Returns the first reader with `id`.
    pub fn find_reader(&self, id: ReaderId) -> Option<&Reader> {
        self.readers.all().iter().find(|reader| reader.id() == id)
    }

    pub fn book(&self, handle: BookHandle) -> Option<&Book> {
        self.books.get(handle)
    }

    pub fn reader(&self, handle: ReaderHandle) -> Option<&Reader> {
        self.readers.get(handle)
    }

    /// Books in insertion order.
    pub fn list_books(&self) -> &[Book] {
        self.books.all()
    }

    /// Readers in insertion order.
    pub fn list_readers(&self) -> &[Reader] {
        self.readers.all()
    }

    /// Renders the book list with a header line.
    pub fn display_books(&self) -> String {
        render_listing("Books in catalog:", self.books.all())
    }

    /// Renders the reader list with a header line.
    pub fn display_readers(&self) -> String {
        render_listing("Registered readers:", self.readers.all())
    }

    /// Hands `book` to `reader`, marks the book as loaned and records the
    /// loan as open in this catalog.
    ///
    /// Every refusal is reported as an event.
    ///
    /// # Errors
    /// - `LoanError::BookNotFound` / `LoanError::ReaderNotFound` when a
    ///   handle does not resolve.
    /// - `LoanError::BookUnavailable` when the book is already on loan.
    pub fn create_loan(
        &mut self,
        book: BookHandle,
        reader: ReaderHandle,
    ) -> Result<Loan, LoanError> {
        if self.readers.get(reader).is_none() {
            warn!(target: CATALOG_LOG_TARGET, "event=loan_create module=catalog status=reader_not_found reader={reader}");
            return Err(self.refuse_loan(LoanError::ReaderNotFound(reader)));
        }
        let Some(entry) = self.books.get_mut(book) else {
            warn!(target: CATALOG_LOG_TARGET, "event=loan_create module=catalog status=book_not_found book={book}");
            return Err(self.refuse_loan(LoanError::BookNotFound(book)));
        };
        if !entry.is_available() {
            let title = entry.title().to_string();
            info!(target: CATALOG_LOG_TARGET, "event=loan_create module=catalog status=unavailable book={book}");
            self.emit(CatalogEvent::BookUnavailable { title });
            return Err(LoanError::BookUnavailable(book));
        }

        entry.mark_as_loaned();
        let loan = Loan::open(book, reader, Utc::now());
        self.open_loans.insert(loan.id());
        info!(
            target: CATALOG_LOG_TARGET,
            "event=loan_create module=catalog status=ok loan={} book={book} reader={reader}",
            loan.id()
        );
        self.emit(CatalogEvent::LoanCreated(self.loan_details(&loan)));
        Ok(loan)
    }

    /// Closes `loan` and puts its book back on the shelf.
    ///
    /// Only loans this catalog opened and has not yet closed are accepted,
    /// so a clone or deserialized copy of a returned loan cannot release a
    /// copy that was lent again. Returns the recorded return time, which is
    /// never earlier than the issue time.
    ///
    /// # Errors
    /// - `LoanError::AlreadyReturned` when `loan` itself is already closed.
    /// - `LoanError::NotOpen` when the catalog holds no open loan with this id.
    /// - `LoanError::BookNotFound` when the book left the catalog; the loan
    ///   stays open.
    pub fn complete_loan(&mut self, loan: &mut Loan) -> Result<DateTime<Utc>, LoanError> {
        let id = loan.id();
        let book = loan.book();
        if let Some(returned_at) = loan.returned_at() {
            warn!(target: CATALOG_LOG_TARGET, "event=loan_complete module=catalog status=already_returned loan={id}");
            return Err(self.refuse_return(LoanError::AlreadyReturned {
                loan: id,
                returned_at,
            }));
        }
        if !self.open_loans.contains(&id) {
            warn!(target: CATALOG_LOG_TARGET, "event=loan_complete module=catalog status=not_open loan={id}");
            return Err(self.refuse_return(LoanError::NotOpen(id)));
        }
        if self.books.get(book).is_none() {
            warn!(target: CATALOG_LOG_TARGET, "event=loan_complete module=catalog status=book_not_found loan={id} book={book}");
            return Err(self.refuse_return(LoanError::BookNotFound(book)));
        }

        let returned_at = loan.close(Utc::now())?;
        self.open_loans.remove(&id);
        if let Some(entry) = self.books.get_mut(book) {
            entry.mark_as_available();
        }

        info!(target: CATALOG_LOG_TARGET, "event=loan_complete module=catalog status=ok loan={id} book={book}");
        self.emit(CatalogEvent::LoanCompleted(self.loan_details(loan)));
        Ok(returned_at)
    }

    /// Returns whether this catalog holds `loan` as open.
    pub fn is_loan_open(&self, loan: LoanId) -> bool {
        self.open_loans.contains(&loan)
    }

    fn refuse_loan(&self, err: LoanError) -> LoanError {
        self.emit(CatalogEvent::LoanRefused(err.clone()));
        err
    }

    fn refuse_return(&self, err: LoanError) -> LoanError {
        self.emit(CatalogEvent::ReturnRefused(err.clone()));
        err
    }

    /// Resolves `loan` references for display.
    pub fn loan_details(&self, loan: &Loan) -> LoanDetails {
        LoanDetails {
            loan: loan.id(),
            book_title: self.books.get(loan.book()).map(|book| book.title().to_string()),
            reader_name: self
                .readers
                .get(loan.reader())
                .map(|reader| reader.name().to_string()),
            issued_at: loan.issued_at(),
            returned_at: loan.returned_at(),
        }
    }

    /// Lends the first book titled `title` to the first reader with
    /// `reader_id`.
    pub fn lend_book(&mut self, title: &str, reader_id: ReaderId) -> LendOutcome {
        let Some(book) = self
            .find_book_by_title(title)
            .filter(|book| book.is_available())
            .map(Book::handle)
        else {
            info!(target: CATALOG_LOG_TARGET, "event=loan_lend module=catalog status=book_unavailable");
            self.emit(CatalogEvent::BookUnavailable {
                title: title.to_string(),
            });
            return LendOutcome::BookUnavailable;
        };
        let Some(reader) = self.find_reader(reader_id).map(Reader::handle) else {
            info!(target: CATALOG_LOG_TARGET, "event=loan_lend module=catalog status=reader_not_found id={reader_id}");
            self.emit(CatalogEvent::ReaderNotFound { id: reader_id });
            return LendOutcome::ReaderNotFound(reader_id);
        };

        match self.create_loan(book, reader) {
            Ok(loan) => LendOutcome::Created(loan),
            Err(LoanError::ReaderNotFound(_)) => LendOutcome::ReaderNotFound(reader_id),
            Err(_) => LendOutcome::BookUnavailable,
        }
    }
}

fn render_listing<T: std::fmt::Display>(header: &str, items: &[T]) -> String {
    let mut lines = Vec::with_capacity(items.len() + 1);
    lines.push(header.to_string());
    lines.extend(items.iter().map(ToString::to_string));
    lines.join("\n")
}
