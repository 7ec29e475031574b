//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes well-known paths for config files
//! 4. Supports TOML and JSON formats
//!
//! ## Environment Variables
//! - `FOLIO_DB_PATH`: Database file path (required)
//! - `FOLIO_DB_POOL_SIZE`: Connection pool size (optional)
//! - `FOLIO_CACHE_TTL_SECS`: Cache entry lifetime in seconds (optional)
//!
//! ## File Locations
//! The loader probes `folio.toml`, `config.toml`, `folio.json` and
//! `config.json` in the current working directory, in that order.

use std::path::{Path, PathBuf};

use folio_domain::config::{DEFAULT_CACHE_TTL_SECS, DEFAULT_DB_POOL_SIZE};
use folio_domain::{CacheSettings, CatalogError, Config, DatabaseConfig, Result};

const PROBE_PATHS: [&str; 4] = ["folio.toml", "config.toml", "folio.json", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `CatalogError::InvalidArgument` if configuration cannot be
/// loaded from either source, the file format is invalid, or required
/// fields are missing.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("configuration loaded from environment variables");
            Ok(config)
        }
        Err(err) => {
            tracing::debug!(error = ?err, "environment incomplete, trying config file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `CatalogError::InvalidArgument` if `FOLIO_DB_PATH` is missing
/// or an optional variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let path = env_var("FOLIO_DB_PATH")?;
    let pool_size = env_parsed("FOLIO_DB_POOL_SIZE", DEFAULT_DB_POOL_SIZE)?;
    let ttl_secs = env_parsed("FOLIO_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?;

    Ok(Config {
        database: DatabaseConfig { path, pool_size },
        cache: CacheSettings { ttl_secs },
    })
}

/// Load configuration from a file
///
/// When `path` is `None`, probes the well-known file names in the current
/// working directory.
///
/// # Errors
/// Returns `CatalogError::InvalidArgument` if no file is found or its
/// contents fail to parse.
pub fn load_from_file(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => probe_config_paths().ok_or_else(|| {
            CatalogError::InvalidArgument("no configuration file found".to_owned())
        })?,
    };

    let contents = std::fs::read_to_string(&path).map_err(|err| {
        CatalogError::InvalidArgument(format!("cannot read {}: {err}", path.display()))
    })?;

    let config = if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&contents).map_err(|err| {
            CatalogError::InvalidArgument(format!("invalid JSON in {}: {err}", path.display()))
        })?
    } else {
        toml::from_str(&contents).map_err(|err| {
            CatalogError::InvalidArgument(format!("invalid TOML in {}: {err}", path.display()))
        })?
    };

    tracing::info!(path = %path.display(), "configuration loaded from file");
    Ok(config)
}

fn probe_config_paths() -> Option<PathBuf> {
    PROBE_PATHS.iter().map(PathBuf::from).find(|p| p.is_file())
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| CatalogError::InvalidArgument(format!("missing environment variable {name}")))
}

fn env_parsed<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|err| CatalogError::InvalidArgument(format!("invalid {name}: {err}"))),
        Err(_) => Ok(default),
    }
}
