//! Mock collaborator implementations for testing
//!
//! Provides an in-memory store stand-in and a cache double for the author
//! service, enabling deterministic unit tests without database or cache
//! dependencies.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use folio_core::catalog::ports::{AuthorRepository, CatalogCache};
use folio_domain::{Author, Book, CatalogError, Result};
use uuid::Uuid;

/// In-memory store stand-in for `AuthorRepository`.
///
/// Keeps authors in insertion order (the "store-defined stable order" used
/// by pagination) and mirrors the real store's unique index on
/// `lower(email)` so the service's conflict translation can be exercised.
#[derive(Default)]
pub struct InMemoryAuthorRepository {
    authors: RwLock<Vec<Author>>,
    books: RwLock<Vec<Book>>,
    read_calls: AtomicUsize,
}

impl InMemoryAuthorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a book owned by an already-persisted author.
    pub fn add_book(&self, book: Book) {
        self.books.write().unwrap().push(book);
    }

    /// Number of read queries that reached the store.
    pub fn read_count(&self) -> usize {
        self.read_calls.load(Ordering::SeqCst)
    }

    /// Number of authors currently persisted.
    pub fn len(&self) -> usize {
        self.authors.read().unwrap().len()
    }

    fn record_read(&self) {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn email_taken(&self, email: &str, exclude: Option<Uuid>) -> bool {
        self.authors
            .read()
            .unwrap()
            .iter()
            .any(|a| Some(a.id) != exclude && a.email.eq_ignore_ascii_case(email))
    }
}

#[async_trait]
impl AuthorRepository for InMemoryAuthorRepository {
    async fn get_all(&self) -> Result<Vec<Author>> {
        self.record_read();
        Ok(self.authors.read().unwrap().clone())
    }

    async fn get_all_with_books(&self) -> Result<Vec<Author>> {
        self.record_read();
        let books = self.books.read().unwrap();
        Ok(self
            .authors
            .read()
            .unwrap()
            .iter()
            .cloned()
            .map(|mut author| {
                author.books =
                    books.iter().filter(|b| b.author_id == author.id).cloned().collect();
                author
            })
            .collect())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Author>> {
        self.record_read();
        Ok(self.authors.read().unwrap().iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Author>> {
        self.record_read();
        Ok(self
            .authors
            .read()
            .unwrap()
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn get_by_filter(&self, first_name: &str, last_name: &str) -> Result<Vec<Author>> {
        self.record_read();
        Ok(self
            .authors
            .read()
            .unwrap()
            .iter()
            .filter(|a| first_name.is_empty() || a.first_name.contains(first_name))
            .filter(|a| last_name.is_empty() || a.last_name.contains(last_name))
            .cloned()
            .collect())
    }

    async fn get_by_page(&self, page: u32, page_size: u32) -> Result<Vec<Author>> {
        self.record_read();
        let skip = (page as usize - 1) * page_size as usize;
        Ok(self
            .authors
            .read()
            .unwrap()
            .iter()
            .skip(skip)
            .take(page_size as usize)
            .cloned()
            .collect())
    }

    async fn add(&self, author: Author) -> Result<Author> {
        // The store-level unique index remains authoritative even when the
        // service-level pre-check raced.
        if self.email_taken(&author.email, None) {
            return Err(CatalogError::Conflict(format!(
                "Author with email '{}' already exists.",
                author.email
            )));
        }

        self.authors.write().unwrap().push(author.clone());
        Ok(author)
    }

    async fn update(&self, author: Author) -> Result<Uuid> {
        if self.email_taken(&author.email, Some(author.id)) {
            return Err(CatalogError::Conflict(format!(
                "Author with email '{}' already exists.",
                author.email
            )));
        }

        let mut authors = self.authors.write().unwrap();
        let Some(slot) = authors.iter_mut().find(|a| a.id == author.id) else {
            return Err(CatalogError::NotFound(format!(
                "Author with ID '{}' not found.",
                author.id
            )));
        };

        let id = author.id;
        *slot = author;
        Ok(id)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Author>> {
        let mut authors = self.authors.write().unwrap();
        let Some(position) = authors.iter().position(|a| a.id == id) else {
            return Ok(None);
        };
        Ok(Some(authors.remove(position)))
    }
}

#[derive(Clone)]
enum Snapshot {
    One(Author),
    Many(Vec<Author>),
}

/// In-memory cache double for `CatalogCache`.
///
/// No TTL bookkeeping: entries live until removed, which is enough to
/// observe population and invalidation. Flipping [`Self::set_failing`]
/// simulates a cache outage where every call errors.
#[derive(Default)]
pub struct MemoryCatalogCache {
    entries: Mutex<HashMap<String, Snapshot>>,
    failing: AtomicBool,
}

impl MemoryCatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent cache call fail with `Unavailable`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Whether a key currently holds a snapshot.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }

    /// Seed a list snapshot directly, bypassing the port.
    pub fn seed_list(&self, key: &str, authors: Vec<Author>) {
        self.entries.lock().unwrap().insert(key.to_owned(), Snapshot::Many(authors));
    }

    fn check_available(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CatalogError::Unavailable("cache connection refused".to_owned()));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogCache for MemoryCatalogCache {
    async fn get_author(&self, key: &str) -> Result<Option<Author>> {
        self.check_available()?;
        Ok(match self.entries.lock().unwrap().get(key) {
            Some(Snapshot::One(author)) => Some(author.clone()),
            _ => None,
        })
    }

    async fn get_author_list(&self, key: &str) -> Result<Option<Vec<Author>>> {
        self.check_available()?;
        Ok(match self.entries.lock().unwrap().get(key) {
            Some(Snapshot::Many(authors)) => Some(authors.clone()),
            _ => None,
        })
    }

    async fn put_author(
        &self,
        key: &str,
        author: &Author,
        expires_at: DateTime<Utc>,
    ) -> Result<bool> {
        self.check_available()?;
        if expires_at <= Utc::now() {
            return Ok(false);
        }
        self.entries.lock().unwrap().insert(key.to_owned(), Snapshot::One(author.clone()));
        Ok(true)
    }

    async fn put_author_list(
        &self,
        key: &str,
        authors: &[Author],
        expires_at: DateTime<Utc>,
    ) -> Result<bool> {
        self.check_available()?;
        if expires_at <= Utc::now() {
            return Ok(false);
        }
        self.entries.lock().unwrap().insert(key.to_owned(), Snapshot::Many(authors.to_vec()));
        Ok(true)
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        self.check_available()?;
        Ok(self.entries.lock().unwrap().remove(key).is_some())
    }

    async fn remove_many(&self, keys: &[String]) -> Result<()> {
        self.check_available()?;
        let mut entries = self.entries.lock().unwrap();
        for key in keys {
            entries.remove(key);
        }
        Ok(())
    }
}
