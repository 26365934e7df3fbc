use librarian_core::{Book, Catalog, Loan, Reader};

#[test]
fn book_serialization_uses_expected_wire_fields() {
    let mut book = Book::new("A", "X", "ISBN1");
    book.mark_as_loaned();

    let json = serde_json::to_value(&book).expect("book serializes");
    assert_eq!(json["handle"], book.handle().to_string());
    assert_eq!(json["title"], "A");
    assert_eq!(json["author"], "X");
    assert_eq!(json["isbn"], "ISBN1");
    assert_eq!(json["available"], false);

    let decoded: Book = serde_json::from_value(json).expect("round trip decodes");
    assert_eq!(decoded, book);
}

#[test]
fn reader_serialization_uses_expected_wire_fields() {
    let reader = Reader::new(7, "R", "r@x.com");

    let json = serde_json::to_value(&reader).expect("reader serializes");
    assert_eq!(json["handle"], reader.handle().to_string());
    assert_eq!(json["id"], 7);
    assert_eq!(json["name"], "R");
    assert_eq!(json["email"], "r@x.com");
}

#[test]
fn open_loan_serializes_null_return_time() {
    let mut catalog = Catalog::new();
    let book = catalog.add_book(Book::new("A", "X", "ISBN1"));
    let reader = catalog.add_reader(Reader::new(1, "R", "r@x.com"));
    let loan = catalog.create_loan(book, reader).expect("loan opens");

    let json = serde_json::to_value(&loan).expect("loan serializes");
    assert_eq!(json["book"], book.to_string());
    assert_eq!(json["reader"], reader.to_string());
    assert!(json["issued_at"].is_string());
    assert!(json["returned_at"].is_null());

    let decoded: Loan = serde_json::from_value(json).expect("round trip decodes");
    assert_eq!(decoded, loan);
}
