//! Cache key conventions for the cache-aside layer
//!
//! Keys are deterministic so a read and the write that invalidates it always
//! agree. Only the aggregate list reads and point lookups are cached;
//! filtered and paginated reads have an unbounded key space and stay
//! uncached.

use uuid::Uuid;

/// Key for the full author list (no books loaded)
pub const ALL_AUTHORS: &str = "authors";

/// Key for the author list with books eager-loaded
pub const ALL_AUTHORS_WITH_BOOKS: &str = "authors:with-books";

/// Key for a single author snapshot
pub fn author_key(id: Uuid) -> String {
    format!("authors:{id}")
}

/// Every key a mutation of author `id` could have made stale: both
/// aggregate list keys plus the entity key.
pub fn stale_on_write(id: Uuid) -> Vec<String> {
    vec![ALL_AUTHORS.to_owned(), ALL_AUTHORS_WITH_BOOKS.to_owned(), author_key(id)]
}
