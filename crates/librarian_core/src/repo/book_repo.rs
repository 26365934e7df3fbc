//! Book storage contract and in-memory implementation.
//!
//! # Responsibility
//! - Hold catalog books in insertion order.
//! - Resolve stable `BookHandle`s for loans.
//!
//! # Invariants
//! - Insertion order is preserved by every read path.
//! - Duplicate isbn values are stored as-is.
//! - Handles are unique within a store: a colliding handle is replaced on
//!   insert, and the returned handle is the one actually stored.

use crate::model::book::{Book, BookHandle};

/// Storage interface for catalog books.
pub trait BookRepository {
    fn insert(&mut self, book: Book) -> BookHandle;
    fn get(&self, handle: BookHandle) -> Option<&Book>;
    fn get_mut(&mut self, handle: BookHandle) -> Option<&mut Book>;
    fn all(&self) -> &[Book];
    /// Removes every book matching `predicate` and returns how many were removed.
    fn remove_where(&mut self, predicate: &dyn Fn(&Book) -> bool) -> usize;
}

/// Vec-backed book storage.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBookRepository {
    books: Vec<Book>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BookRepository for InMemoryBookRepository {
    fn insert(&mut self, mut book: Book) -> BookHandle {
        while self.get(book.handle()).is_some() {
            book.reassign_handle();
        }
        let handle = book.handle();
        self.books.push(book);
        handle
    }

    fn get(&self, handle: BookHandle) -> Option<&Book> {
        self.books.iter().find(|book| book.handle() == handle)
    }

    fn get_mut(&mut self, handle: BookHandle) -> Option<&mut Book> {
        self.books.iter_mut().find(|book| book.handle() == handle)
    }

    fn all(&self) -> &[Book] {
        &self.books
    }

    fn remove_where(&mut self, predicate: &dyn Fn(&Book) -> bool) -> usize {
        let before = self.books.len();
        self.books.retain(|book| !predicate(book));
        before - self.books.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{BookRepository, InMemoryBookRepository};
    use crate::model::book::Book;

    #[test]
    fn remove_where_keeps_order_of_survivors() {
        let mut repo = InMemoryBookRepository::new();
        repo.insert(Book::new("A", "X", "1"));
        repo.insert(Book::new("B", "X", "2"));
        repo.insert(Book::new("C", "X", "1"));
        repo.insert(Book::new("D", "X", "3"));

        let removed = repo.remove_where(&|book| book.isbn() == "1");
        assert_eq!(removed, 2);

        let titles: Vec<_> = repo.all().iter().map(|book| book.title()).collect();
        assert_eq!(titles, vec!["B", "D"]);
    }

    #[test]
    fn get_mut_resolves_by_handle() {
        let mut repo = InMemoryBookRepository::new();
        let handle = repo.insert(Book::new("A", "X", "1"));

        repo.get_mut(handle)
            .expect("inserted book resolves")
            .mark_as_loaned();
        assert!(!repo.get(handle).expect("inserted book resolves").is_available());
    }

    #[test]
    fn insert_replaces_colliding_handle() {
        let mut repo = InMemoryBookRepository::new();
        let original = Book::new("A", "X", "1");
        let first = repo.insert(original.clone());
        let second = repo.insert(original);

        assert_ne!(first, second);
        repo.get_mut(second)
            .expect("second copy resolves")
            .mark_as_loaned();
        assert!(repo.get(first).expect("first copy resolves").is_available());
    }
}
