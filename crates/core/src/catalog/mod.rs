//! Author catalog: service, ports and cache key conventions

pub mod keys;
pub mod ports;
pub mod service;

pub use service::AuthorService;
