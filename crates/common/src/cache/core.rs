//! Core cache implementation with per-entry expiration
//!
//! Entries carry an absolute deadline instead of a cache-wide TTL, matching
//! a set-with-expiry key-value contract. Expired entries are treated as
//! misses and removed on access.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};
use std::time::Instant;

use super::stats::{CacheStats, MetricsCollector};
use crate::time::{Clock, SystemClock};

/// Entry stored in the cache together with its expiration deadline
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

/// Generic thread-safe cache with per-entry expiration
///
/// # Type Parameters
/// - `K`: Key type (must be `Eq + Hash + Clone`)
/// - `V`: Value type (must be `Clone`)
/// - `C`: Clock type for time-based operations (defaults to `SystemClock`)
///
/// Clones share the underlying storage, so a cache can be handed to several
/// owners and stay coherent.
///
/// # Example
/// ```
/// use std::time::Duration;
///
/// use folio_common::cache::Cache;
/// use folio_common::{Clock, SystemClock};
///
/// let cache: Cache<String, i32> = Cache::new();
/// let deadline = SystemClock.now() + Duration::from_secs(60);
/// cache.insert_until("key".to_string(), 42, deadline);
/// assert_eq!(cache.get(&"key".to_string()), Some(42));
/// ```
pub struct Cache<K, V, C = SystemClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    storage: Arc<RwLock<HashMap<K, CacheEntry<V>>>>,
    metrics: MetricsCollector,
    clock: C,
}

impl<K, V> Cache<K, V, SystemClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a new cache using the system clock
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<K, V> Default for Cache<K, V, SystemClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> Cache<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock + Clone,
{
    /// Create a new cache with a custom clock (useful for testing)
    pub fn with_clock(clock: C) -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
            metrics: MetricsCollector::new(),
            clock,
        }
    }

    /// Insert a value that expires at `expires_at`.
    ///
    /// Returns `false` without writing when the deadline is not strictly in
    /// the future; such a call indicates a caller bug, not a cache fault.
    /// Inserting over an existing key replaces the value and its deadline.
    pub fn insert_until(&self, key: K, value: V, expires_at: Instant) -> bool {
        if expires_at <= self.clock.now() {
            self.metrics.record_rejected_insert();
            return false;
        }

        let mut storage = self.storage.write().unwrap();
        storage.insert(key, CacheEntry { value, expires_at });
        self.metrics.record_insert();
        true
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or the entry has expired;
    /// an expired entry is removed on the way out.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut storage = self.storage.write().unwrap();
        let now = self.clock.now();

        let Some(entry) = storage.get(key) else {
            self.metrics.record_miss();
            return None;
        };

        if entry.expires_at > now {
            let value = entry.value.clone();
            self.metrics.record_hit();
            return Some(value);
        }

        // Expired: remove on the way out and report a miss.
        storage.remove(key);
        self.metrics.record_miss();
        self.metrics.record_expiration();
        None
    }

    /// Remove a value from the cache, returning it if it was present and
    /// not yet expired.
    pub fn remove(&self, key: &K) -> Option<V> {
        let mut storage = self.storage.write().unwrap();
        let now = self.clock.now();
        storage.remove(key).filter(|entry| entry.expires_at > now).map(|entry| entry.value)
    }

    /// Remove a batch of keys, returning how many live entries were removed.
    ///
    /// Keys that are absent are simply skipped; batch removal is
    /// best-effort and never fails.
    pub fn remove_many(&self, keys: &[K]) -> usize {
        let mut storage = self.storage.write().unwrap();
        let now = self.clock.now();
        keys.iter()
            .filter_map(|key| storage.remove(key))
            .filter(|entry| entry.expires_at > now)
            .count()
    }

    /// Clear all entries from the cache and reset statistics
    pub fn clear(&self) {
        self.storage.write().unwrap().clear();
        self.metrics.reset();
    }

    /// Get the current number of entries (expired entries included until
    /// they are observed or cleaned up)
    pub fn len(&self) -> usize {
        self.storage.read().unwrap().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all expired entries eagerly.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&self) -> usize {
        let now = self.clock.now();
        let mut storage = self.storage.write().unwrap();

        let expired: Vec<K> = storage
            .iter()
            .filter(|(_, entry)| entry.expires_at <= now)
            .map(|(k, _)| k.clone())
            .collect();

        for key in &expired {
            storage.remove(key);
            self.metrics.record_expiration();
        }

        expired.len()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        self.metrics.snapshot(self.len())
    }
}

impl<K, V, C> Clone for Cache<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock + Clone,
{
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            metrics: self.metrics.clone(),
            clock: self.clock.clone(),
        }
    }
}
