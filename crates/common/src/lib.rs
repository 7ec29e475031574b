//! # Folio Common
//!
//! Shared infrastructure-free utilities for the Folio catalog.
//!
//! This crate contains:
//! - A generic, thread-safe cache with per-entry expiration and statistics
//! - A clock abstraction for deterministic time-based testing
//!
//! ## Architecture
//! - No dependencies on other Folio crates
//! - No I/O; pure in-process data structures

pub mod cache;
pub mod time;

pub use time::{Clock, MockClock, SystemClock};
