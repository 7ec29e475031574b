//! Port interfaces for the author catalog
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use folio_domain::{Author, Result};
use uuid::Uuid;

/// Trait for author persistence and retrieval.
///
/// Every call is a single round-trip to the backing store; the store does
/// not retry and is never cache-aware. Lookups return `Ok(None)` for an
/// absent record - absence is a valid outcome, not an error.
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Get all authors, without their books
    async fn get_all(&self) -> Result<Vec<Author>>;

    /// Get all authors with their books (and book genres) eager-loaded
    async fn get_all_with_books(&self) -> Result<Vec<Author>>;

    /// Get an author by ID
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Author>>;

    /// Find an author by email, compared case-insensitively
    async fn find_by_email(&self, email: &str) -> Result<Option<Author>>;

    /// Get authors whose first/last name contains the given substrings.
    ///
    /// An empty filter string matches everything; non-empty filters are
    /// ANDed and matched case-sensitively.
    async fn get_by_filter(&self, first_name: &str, last_name: &str) -> Result<Vec<Author>>;

    /// Get one page of authors in stable store order.
    ///
    /// `page` is 1-based; callers validate positivity before calling.
    async fn get_by_page(&self, page: u32, page_size: u32) -> Result<Vec<Author>>;

    /// Insert a new author and return the persisted snapshot
    async fn add(&self, author: Author) -> Result<Author>;

    /// Replace an existing author's fields, returning its ID
    async fn update(&self, author: Author) -> Result<Uuid>;

    /// Delete an author by ID, returning the pre-deletion snapshot,
    /// or `None` if it was absent
    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Author>>;
}

/// Trait for the side cache of author snapshots.
///
/// A miss (or an expired entry) is a normal `Ok(None)` outcome. `Err` means
/// the cache collaborator itself failed; the service swallows such errors
/// and degrades to always-miss, so cache trouble never becomes a business
/// failure.
#[async_trait]
pub trait CatalogCache: Send + Sync {
    /// Get a cached author snapshot
    async fn get_author(&self, key: &str) -> Result<Option<Author>>;

    /// Get a cached author list snapshot
    async fn get_author_list(&self, key: &str) -> Result<Option<Vec<Author>>>;

    /// Cache an author snapshot until `expires_at`.
    ///
    /// Returns `false` when the write was refused, e.g. because the
    /// deadline is not in the future.
    async fn put_author(&self, key: &str, author: &Author, expires_at: DateTime<Utc>)
        -> Result<bool>;

    /// Cache an author list snapshot until `expires_at`
    async fn put_author_list(
        &self,
        key: &str,
        authors: &[Author],
        expires_at: DateTime<Utc>,
    ) -> Result<bool>;

    /// Remove one entry; `true` iff a value existed and was deleted
    async fn remove(&self, key: &str) -> Result<bool>;

    /// Remove a batch of entries, best-effort: individual failures are
    /// logged by the implementation and do not abort the batch
    async fn remove_many(&self, keys: &[String]) -> Result<()>;
}
