//! Storage contracts and in-memory implementations.
//!
//! # Responsibility
//! - Define the data access seams the catalog service is written against.
//! - Keep collection details out of the service layer.
//!
//! # Invariants
//! - Stores never validate or deduplicate; they hold what they are given.
//! - Stores are process-local and single-threaded.

pub mod book_repo;
pub mod reader_repo;
