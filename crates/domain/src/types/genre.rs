//! Genre entity

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A genre a book can be associated with (many-to-many).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// Identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
}
