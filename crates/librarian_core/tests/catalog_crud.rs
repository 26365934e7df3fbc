use librarian_core::{
    Book, Catalog, CatalogEvent, MemoryReporter, Reader, RemoveBookOutcome, RemoveReaderOutcome,
};

fn catalog_with_reporter() -> (Catalog, MemoryReporter) {
    let reporter = MemoryReporter::new();
    let catalog = Catalog::new().with_reporter(reporter.clone());
    (catalog, reporter)
}

#[test]
fn added_then_removed_books_are_not_found_by_isbn() {
    let mut catalog = Catalog::new();
    catalog.add_book(Book::new("A", "X", "ISBN1"));
    catalog.add_book(Book::new("B", "Y", "ISBN2"));

    assert_eq!(catalog.remove_book("ISBN1"), RemoveBookOutcome::Removed(1));
    assert!(catalog.find_book_by_isbn("ISBN1").is_none());
    assert!(catalog.find_book_by_isbn("ISBN2").is_some());
}

#[test]
fn remove_book_removes_every_available_duplicate() {
    let mut catalog = Catalog::new();
    catalog.add_book(Book::new("A", "X", "ISBN1"));
    catalog.add_book(Book::new("B", "Y", "ISBN2"));
    catalog.add_book(Book::new("A (2nd copy)", "X", "ISBN1"));

    assert_eq!(catalog.remove_book("ISBN1"), RemoveBookOutcome::Removed(2));

    let isbns: Vec<_> = catalog.list_books().iter().map(Book::isbn).collect();
    assert_eq!(isbns, vec!["ISBN2"]);
}

#[test]
fn remove_missing_book_reports_and_changes_nothing() {
    let (mut catalog, reporter) = catalog_with_reporter();
    catalog.add_book(Book::new("A", "X", "ISBN1"));

    assert_eq!(catalog.remove_book("nope"), RemoveBookOutcome::NotFound);
    assert_eq!(catalog.list_books().len(), 1);
    assert_eq!(
        reporter.lines().last().map(String::as_str),
        Some("Book not found or currently on loan.")
    );
}

#[test]
fn find_book_by_title_is_absent_on_empty_or_unmatched_catalog() {
    let mut catalog = Catalog::new();
    assert!(catalog.find_book_by_title("A").is_none());

    catalog.add_book(Book::new("A", "X", "ISBN1"));
    assert!(catalog.find_book_by_title("a").is_none());
    assert!(catalog.find_book_by_title("B").is_none());
}

#[test]
fn find_book_by_title_returns_first_match() {
    let mut catalog = Catalog::new();
    let first = catalog.add_book(Book::new("A", "X", "ISBN1"));
    catalog.add_book(Book::new("A", "Z", "ISBN9"));

    let found = catalog.find_book_by_title("A").expect("book is listed");
    assert_eq!(found.handle(), first);
    assert_eq!(found.isbn(), "ISBN1");
}

#[test]
fn duplicates_and_odd_inputs_are_accepted() {
    let mut catalog = Catalog::new();
    catalog.add_book(Book::new("", "", "ISBN1"));
    catalog.add_book(Book::new("", "", "ISBN1"));
    catalog.add_reader(Reader::new(-1, "", ""));
    catalog.add_reader(Reader::new(-1, "", ""));

    assert_eq!(catalog.list_books().len(), 2);
    assert_eq!(catalog.list_readers().len(), 2);
}

#[test]
fn remove_reader_removes_every_match() {
    let mut catalog = Catalog::new();
    catalog.add_reader(Reader::new(1, "R", "r@x.com"));
    catalog.add_reader(Reader::new(2, "S", "s@x.com"));
    catalog.add_reader(Reader::new(1, "R again", "r2@x.com"));

    assert_eq!(catalog.remove_reader(1), RemoveReaderOutcome::Removed(2));
    assert!(catalog.find_reader(1).is_none());
    let ids: Vec<_> = catalog.list_readers().iter().map(Reader::id).collect();
    assert_eq!(ids, vec![2]);

    assert_eq!(catalog.remove_reader(1), RemoveReaderOutcome::NotFound);
}

#[test]
fn list_readers_preserves_insertion_order() {
    let mut catalog = Catalog::new();
    catalog.add_reader(Reader::new(3, "C", "c@x.com"));
    catalog.add_reader(Reader::new(1, "A", "a@x.com"));
    catalog.add_reader(Reader::new(2, "B", "b@x.com"));

    let names: Vec<_> = catalog.list_readers().iter().map(Reader::name).collect();
    assert_eq!(names, vec!["C", "A", "B"]);
}

#[test]
fn every_crud_operation_reports_one_event() {
    let (mut catalog, reporter) = catalog_with_reporter();

    catalog.add_book(Book::new("A", "X", "ISBN1"));
    catalog.add_reader(Reader::new(1, "R", "r@x.com"));
    catalog.remove_book("ISBN1");
    catalog.remove_reader(1);
    catalog.remove_reader(1);

    assert_eq!(
        reporter.events(),
        vec![
            CatalogEvent::BookAdded {
                title: "A".to_string()
            },
            CatalogEvent::ReaderAdded {
                name: "R".to_string()
            },
            CatalogEvent::BookRemoved { count: 1 },
            CatalogEvent::ReaderRemoved { count: 1 },
            CatalogEvent::ReaderNotFound { id: 1 },
        ]
    );
}

#[test]
fn display_books_lists_each_book_with_status() {
    let mut catalog = Catalog::new();
    catalog.add_book(Book::new("A", "X", "ISBN1"));
    catalog.add_book(Book::new("B", "Y", "ISBN2"));

    assert_eq!(
        catalog.display_books(),
        "Books in catalog:\n\
         Title: A, Author: X, ISBN: ISBN1, Status: available\n\
         Title: B, Author: Y, ISBN: ISBN2, Status: available"
    );
}
