//! Catalog use-case services.
//!
//! # Responsibility
//! - Coordinate book/reader stores and loan lifecycle into one API.
//! - Turn outcomes into reportable events for the console surface.

pub mod catalog_service;
pub mod report;
