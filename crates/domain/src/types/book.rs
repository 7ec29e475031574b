//! Book entity

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::genre::Genre;

/// A book persisted in the catalog.
///
/// `author_id` is a strong reference; the store enforces that it names an
/// existing author. Price is kept in integer minor units (cents) so money
/// arithmetic stays exact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Identifier
    pub id: Uuid,
    /// Title
    pub title: String,
    /// Year of first release
    pub release_year: i32,
    /// Price in minor currency units (exact, no floating point)
    pub price_cents: i64,
    /// Owning author
    pub author_id: Uuid,
    /// Genre associations (many-to-many)
    #[serde(default)]
    pub genres: Vec<Genre>,
}
