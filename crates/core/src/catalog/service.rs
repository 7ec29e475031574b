//! Author catalog service - core business logic
//!
//! Orchestrates the store and the side cache: enforces email uniqueness and
//! partial-update merge semantics, and keeps cache entries from going stale
//! relative to the store by invalidating after every committed write.
//!
//! Cache failures are strictly isolated from business outcomes: a broken
//! cache degrades reads to always-miss and never blocks or fails a write.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use folio_domain::config::DEFAULT_CACHE_TTL_SECS;
use folio_domain::{Author, AuthorPatch, CatalogError, NewAuthor, Result};
use tracing::{debug, warn};
use uuid::Uuid;

use super::keys;
use super::ports::{AuthorRepository, CatalogCache};

/// Author catalog service
pub struct AuthorService {
    repository: Arc<dyn AuthorRepository>,
    cache: Arc<dyn CatalogCache>,
    cache_ttl: Duration,
}

impl AuthorService {
    /// Create a new service with the default cache entry lifetime.
    pub fn new(repository: Arc<dyn AuthorRepository>, cache: Arc<dyn CatalogCache>) -> Self {
        Self { repository, cache, cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS) }
    }

    /// Override how long cached snapshots live before expiring.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Get all authors, without books. Cached under the aggregate list key.
    pub async fn get_all(&self) -> Result<Vec<Author>> {
        self.cached_list(keys::ALL_AUTHORS, || self.repository.get_all()).await
    }

    /// Get all authors with their books eager-loaded. Cached under its own
    /// aggregate key so it never shadows the plain list.
    pub async fn get_all_with_books(&self) -> Result<Vec<Author>> {
        self.cached_list(keys::ALL_AUTHORS_WITH_BOOKS, || self.repository.get_all_with_books())
            .await
    }

    /// Get an author by ID.
    ///
    /// `Ok(None)` is a success-shaped "not found" so callers can render
    /// 404 vs 200 without inspecting an error payload. Absent authors are
    /// not cached.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Author>> {
        let key = keys::author_key(id);

        match self.cache.get_author(&key).await {
            Ok(Some(author)) => {
                debug!(%key, "author cache hit");
                return Ok(Some(author));
            }
            Ok(None) => {}
            Err(err) => warn!(%key, error = %err, "cache read failed, falling back to store"),
        }

        let Some(author) = self.repository.get_by_id(id).await? else {
            return Ok(None);
        };

        self.populate_author(&key, &author).await;
        Ok(Some(author))
    }

    /// Get authors whose names contain the given substrings (ANDed,
    /// case-sensitive). Both filters empty returns an empty list without
    /// querying the store; an unfiltered "return everyone" belongs to
    /// [`Self::get_all`]. Never cached.
    pub async fn get_by_filter(&self, first_name: &str, last_name: &str) -> Result<Vec<Author>> {
        if first_name.is_empty() && last_name.is_empty() {
            return Ok(Vec::new());
        }

        self.repository.get_by_filter(first_name, last_name).await
    }

    /// Get one page of authors in stable store order.
    ///
    /// `page` is 1-based. Zero page or page size is an `InvalidArgument`
    /// failure; a page beyond the available data is an empty list. Never
    /// cached.
    pub async fn get_by_page(&self, page: u32, page_size: u32) -> Result<Vec<Author>> {
        if page == 0 || page_size == 0 {
            return Err(CatalogError::InvalidArgument(
                "Page and pageSize must be greater than zero.".to_owned(),
            ));
        }

        self.repository.get_by_page(page, page_size).await
    }

    /// Create an author from a draft.
    ///
    /// Fails with `Conflict` when another author already uses the email
    /// (case-insensitive); nothing is persisted in that case. On success a
    /// fresh ID is assigned and the persisted snapshot returned.
    pub async fn add(&self, draft: NewAuthor) -> Result<Author> {
        self.ensure_email_free(&draft.email).await?;

        let author = Author {
            id: Uuid::new_v4(),
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            birth_date: draft.birth_date,
            books: Vec::new(),
        };

        let persisted = self.repository.add(author).await?;
        self.invalidate(persisted.id).await;
        Ok(persisted)
    }

    /// Replace all fields of an existing author.
    ///
    /// Fails with `NotFound` when the ID does not exist. The uniqueness
    /// check runs only when the email actually changed, so writing back an
    /// author's own email (any casing) never conflicts.
    pub async fn update_full(&self, author: Author) -> Result<Uuid> {
        let existing = self
            .repository
            .get_by_id(author.id)
            .await?
            .ok_or_else(|| not_found(author.id))?;

        if !existing.email_matches(&author.email) {
            self.ensure_email_free(&author.email).await?;
        }

        let id = self.repository.update(author).await?;
        self.invalidate(id).await;
        Ok(id)
    }

    /// Merge the supplied fields of a patch into an existing author.
    ///
    /// Unsupplied (`None`) fields are left untouched; an all-`None` patch
    /// is a successful no-op. An email change re-runs the uniqueness check.
    pub async fn update_partial(&self, patch: AuthorPatch) -> Result<Uuid> {
        let mut existing = self
            .repository
            .get_by_id(patch.id)
            .await?
            .ok_or_else(|| not_found(patch.id))?;

        if let Some(first_name) = patch.first_name {
            existing.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            existing.last_name = last_name;
        }
        if let Some(email) = patch.email {
            if !existing.email_matches(&email) {
                self.ensure_email_free(&email).await?;
            }
            existing.email = email;
        }
        if let Some(birth_date) = patch.birth_date {
            existing.birth_date = birth_date;
        }

        let id = self.repository.update(existing).await?;
        self.invalidate(id).await;
        Ok(id)
    }

    /// Delete an author, returning the pre-deletion snapshot.
    ///
    /// Fails with `NotFound` when the ID does not exist.
    pub async fn delete_by_id(&self, id: Uuid) -> Result<Author> {
        let Some(author) = self.repository.delete_by_id(id).await? else {
            return Err(not_found(id));
        };

        self.invalidate(id).await;
        Ok(author)
    }

    /// Early-exit uniqueness pre-check. The store's unique index remains
    /// the authority under concurrency; its constraint violation surfaces
    /// as the same `Conflict`.
    async fn ensure_email_free(&self, email: &str) -> Result<()> {
        match self.repository.find_by_email(email).await? {
            Some(_) => Err(CatalogError::Conflict(format!(
                "Author with email '{email}' already exists."
            ))),
            None => Ok(()),
        }
    }

    /// Read-through for list endpoints: cache hit wins, a miss reads the
    /// store and repopulates. Cache errors degrade to a miss.
    async fn cached_list<'a, F, Fut>(&'a self, key: &str, read_store: F) -> Result<Vec<Author>>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<Vec<Author>>> + Send + 'a,
    {
        match self.cache.get_author_list(key).await {
            Ok(Some(authors)) => {
                debug!(%key, "author list cache hit");
                return Ok(authors);
            }
            Ok(None) => {}
            Err(err) => warn!(%key, error = %err, "cache read failed, falling back to store"),
        }

        let authors = read_store().await?;

        match self.cache.put_author_list(key, &authors, self.cache_deadline()).await {
            Ok(true) => {}
            Ok(false) => debug!(%key, "cache refused list snapshot"),
            Err(err) => warn!(%key, error = %err, "failed to populate author list cache"),
        }

        Ok(authors)
    }

    async fn populate_author(&self, key: &str, author: &Author) {
        match self.cache.put_author(key, author, self.cache_deadline()).await {
            Ok(true) => {}
            Ok(false) => debug!(%key, "cache refused author snapshot"),
            Err(err) => warn!(%key, error = %err, "failed to populate author cache"),
        }
    }

    /// Drop every entry a write on `id` could have made stale. Runs after
    /// the store write has committed; a failure here only widens the
    /// staleness window up to the entry TTL, so it is logged and swallowed.
    async fn invalidate(&self, id: Uuid) {
        let stale = keys::stale_on_write(id);
        if let Err(err) = self.cache.remove_many(&stale).await {
            warn!(author_id = %id, error = %err, "cache invalidation failed, entries expire by TTL");
        }
    }

    fn cache_deadline(&self) -> DateTime<Utc> {
        Utc::now() + self.cache_ttl
    }
}

fn not_found(id: Uuid) -> CatalogError {
    CatalogError::NotFound(format!("Author with ID '{id}' not found."))
}
