//! Application configuration structures
//!
//! Loaded by `folio-infra` from environment variables or a config file.

use serde::{Deserialize, Serialize};

/// Default cache entry lifetime, in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 120;

/// Default connection pool size for the SQLite store.
pub const DEFAULT_DB_POOL_SIZE: u32 = 4;

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Store configuration
    pub database: DatabaseConfig,
    /// Cache-aside configuration
    #[serde(default)]
    pub cache: CacheSettings,
}

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: String,
    /// Connection pool size
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

/// Cache-aside configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Time-to-live for cached snapshots, in seconds
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self { ttl_secs: DEFAULT_CACHE_TTL_SECS }
    }
}

fn default_ttl_secs() -> u64 {
    DEFAULT_CACHE_TTL_SECS
}

fn default_pool_size() -> u32 {
    DEFAULT_DB_POOL_SIZE
}
