//! In-process cache implementation of the catalog cache port

pub mod serialized;

pub use serialized::SerializedCache;
