//! # Folio Infrastructure
//!
//! Infrastructure implementations of core catalog ports.
//!
//! This crate contains:
//! - SQLite-backed store implementation (rusqlite + r2d2 pool)
//! - In-process serialized snapshot cache
//! - Configuration loading
//! - Conversions from external errors into domain errors
//!
//! ## Architecture
//! - Implements traits defined in `folio-core`
//! - Depends on `folio-domain`, `folio-core` and `folio-common`
//! - Contains all "impure" code (I/O, connection pooling)

pub mod cache;
pub mod config;
pub mod database;
pub mod errors;

// Re-export commonly used items
pub use cache::SerializedCache;
pub use database::{DbManager, SqliteAuthorRepository};
