//! Catalog domain model.
//!
//! # Responsibility
//! - Define the book, reader and loan records used by the catalog.
//!
//! # Invariants
//! - Books and readers are identified by stable handles, not by isbn or
//!   numeric id, which may repeat.
//! - Loans reference books and readers only through handles.

pub mod book;
pub mod loan;
pub mod reader;
