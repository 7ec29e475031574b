//! Serialized snapshot cache
//!
//! Implements the `CatalogCache` port over the generic cache from
//! `folio-common`. Values are opaque JSON snapshots, so the cache never
//! depends on domain types staying layout-compatible with what a remote
//! cache (the original deployment used Redis) would hold.
//!
//! A corrupt payload is treated as a miss and dropped, never surfaced as a
//! business failure.

use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use folio_common::cache::Cache;
use folio_core::catalog::ports::CatalogCache;
use folio_domain::{Author, CatalogError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

/// In-process implementation of `CatalogCache` holding JSON snapshots.
#[derive(Clone, Default)]
pub struct SerializedCache {
    entries: Cache<String, String>,
}

impl SerializedCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self { entries: Cache::new() }
    }

    /// Expose cache statistics (hits, misses, inserts, expirations).
    pub fn stats(&self) -> folio_common::cache::CacheStats {
        self.entries.stats()
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let payload = self.entries.get(&key.to_owned())?;
        match serde_json::from_str(&payload) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(%key, error = %err, "dropping corrupt cache payload");
                self.entries.remove(&key.to_owned());
                None
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T, expires_at: DateTime<Utc>) -> Result<bool> {
        // Map the wall-clock deadline onto the monotonic clock the cache
        // runs on; a deadline already in the past is refused outright.
        let Ok(remaining) = (expires_at - Utc::now()).to_std() else {
            return Ok(false);
        };

        let payload = serde_json::to_string(value)
            .map_err(|err| CatalogError::Unavailable(format!("cache serialization: {err}")))?;

        Ok(self.entries.insert_until(key.to_owned(), payload, Instant::now() + remaining))
    }
}

#[async_trait]
impl CatalogCache for SerializedCache {
    async fn get_author(&self, key: &str) -> Result<Option<Author>> {
        Ok(self.read(key))
    }

    async fn get_author_list(&self, key: &str) -> Result<Option<Vec<Author>>> {
        Ok(self.read(key))
    }

    async fn put_author(
        &self,
        key: &str,
        author: &Author,
        expires_at: DateTime<Utc>,
    ) -> Result<bool> {
        self.write(key, author, expires_at)
    }

    async fn put_author_list(
        &self,
        key: &str,
        authors: &[Author],
        expires_at: DateTime<Utc>,
    ) -> Result<bool> {
        self.write(key, &authors, expires_at)
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.entries.remove(&key.to_owned()).is_some())
    }

    async fn remove_many(&self, keys: &[String]) -> Result<()> {
        self.entries.remove_many(keys);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    use super::*;

    fn author() -> Author {
        Author {
            id: Uuid::new_v4(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@x.io".into(),
            birth_date: Utc.with_ymd_and_hms(1815, 12, 10, 0, 0, 0).unwrap(),
            books: Vec::new(),
        }
    }

    #[tokio::test]
    async fn snapshot_round_trips_through_json() {
        let cache = SerializedCache::new();
        let ada = author();
        let deadline = Utc::now() + Duration::minutes(5);

        assert!(cache.put_author("authors:ada", &ada, deadline).await.unwrap());
        let cached = cache.get_author("authors:ada").await.unwrap();
        assert_eq!(cached, Some(ada));
    }

    #[tokio::test]
    async fn list_snapshot_round_trips() {
        let cache = SerializedCache::new();
        let authors = vec![author(), author()];
        let deadline = Utc::now() + Duration::minutes(5);

        assert!(cache.put_author_list("authors", &authors, deadline).await.unwrap());
        let cached = cache.get_author_list("authors").await.unwrap();
        assert_eq!(cached, Some(authors));
    }

    #[tokio::test]
    async fn past_deadline_is_refused_without_writing() {
        let cache = SerializedCache::new();
        let deadline = Utc::now() - Duration::seconds(1);

        assert!(!cache.put_author("authors:x", &author(), deadline).await.unwrap());
        assert_eq!(cache.get_author("authors:x").await.unwrap(), None);
    }

    #[tokio::test]
    async fn remove_reports_whether_entry_existed() {
        let cache = SerializedCache::new();
        let deadline = Utc::now() + Duration::minutes(5);
        cache.put_author("authors:x", &author(), deadline).await.unwrap();

        assert!(cache.remove("authors:x").await.unwrap());
        assert!(!cache.remove("authors:x").await.unwrap());
    }

    #[tokio::test]
    async fn remove_many_is_best_effort_over_missing_keys() {
        let cache = SerializedCache::new();
        let deadline = Utc::now() + Duration::minutes(5);
        cache.put_author("a", &author(), deadline).await.unwrap();

        cache
            .remove_many(&["a".to_owned(), "missing".to_owned()])
            .await
            .unwrap();
        assert_eq!(cache.get_author("a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_payload_degrades_to_miss() {
        let cache = SerializedCache::new();
        cache.entries.insert_until(
            "authors:bad".to_owned(),
            "{not json".to_owned(),
            Instant::now() + std::time::Duration::from_secs(60),
        );

        assert_eq!(cache.get_author("authors:bad").await.unwrap(), None);
        // The corrupt entry was dropped, not left to poison later reads.
        assert_eq!(cache.entries.get(&"authors:bad".to_owned()), None);
    }
}
