//! # Folio Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The author catalog service and its business rules
//! - Port/adapter interfaces (traits) for the store and the cache
//! - Cache key conventions for the cache-aside layer
//!
//! ## Architecture Principles
//! - Only depends on `folio-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod catalog;

// Re-export specific items to avoid ambiguity
pub use catalog::ports::{AuthorRepository, CatalogCache};
pub use catalog::AuthorService;
