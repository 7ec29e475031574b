//! Generic cache with per-entry expiration
//!
//! This module provides a thread-safe key-value cache where every entry
//! carries its own absolute expiration deadline. Expired entries behave as
//! misses and are removed lazily on access (or eagerly via
//! [`Cache::cleanup_expired`]).
//!
//! # Features
//!
//! - **Thread-safe**: `Arc<RwLock<>>` storage, clones share state
//! - **Generic**: works with any `K: Eq + Hash + Clone` and `V: Clone`
//! - **Per-entry TTL**: each insert names its own deadline; inserts with a
//!   deadline that is not strictly in the future are refused
//! - **Batch removal**: best-effort `remove_many` for invalidation sweeps
//! - **Metrics**: hit/miss/insert/expiration statistics
//! - **Testable**: clock abstraction for deterministic time-based testing
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use folio_common::cache::Cache;
//! use folio_common::{Clock, SystemClock};
//!
//! let cache: Cache<String, i32> = Cache::new();
//! let deadline = SystemClock.now() + Duration::from_secs(60);
//!
//! assert!(cache.insert_until("key".to_string(), 42, deadline));
//! assert_eq!(cache.get(&"key".to_string()), Some(42));
//! ```

mod core;
mod stats;

pub use core::Cache;
pub use stats::CacheStats;
