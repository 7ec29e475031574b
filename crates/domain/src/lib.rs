//! # Folio Domain
//!
//! Business domain types and models for the Folio catalog.
//!
//! This crate contains:
//! - Domain data types (Author, Book, Genre)
//! - Create/patch input types (NewAuthor, AuthorPatch)
//! - Domain error types and Result definitions
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other Folio crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::{CacheSettings, Config, DatabaseConfig};
pub use errors::{CatalogError, Result};
pub use types::author::{Author, AuthorPatch, NewAuthor};
pub use types::book::Book;
pub use types::genre::Genre;
