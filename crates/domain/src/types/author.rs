//! Author entity and its service input types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::book::Book;

/// An author persisted in the catalog.
///
/// `email` is globally unique across all authors, compared
/// case-insensitively. `books` is a back-reference populated only by
/// eager-loading reads; an author without loaded books carries an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    /// Service-assigned identifier, immutable after creation
    pub id: Uuid,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Unique contact email (case-insensitive uniqueness)
    pub email: String,
    /// Birth date, stored normalized to UTC
    pub birth_date: DateTime<Utc>,
    /// Books owned by this author (relation only; empty unless eager-loaded)
    #[serde(default)]
    pub books: Vec<Book>,
}

impl Author {
    /// Compare this author's email against another, ignoring ASCII case.
    pub fn email_matches(&self, other: &str) -> bool {
        self.email.eq_ignore_ascii_case(other)
    }
}

/// Input for creating an author.
///
/// Carries no ID field: identifiers are always assigned by the service, so a
/// caller-supplied ID on create is unrepresentable by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAuthor {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Contact email; must not collide with an existing author
    pub email: String,
    /// Birth date in UTC
    pub birth_date: DateTime<Utc>,
}

/// Input for a partial author update.
///
/// Each mutable field is explicitly present-or-absent: `None` means "not
/// supplied, leave untouched".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorPatch {
    /// Identifier of the author to update
    pub id: Uuid,
    /// Replacement given name, if supplied
    pub first_name: Option<String>,
    /// Replacement family name, if supplied
    pub last_name: Option<String>,
    /// Replacement email, if supplied; re-checked for uniqueness on change
    pub email: Option<String>,
    /// Replacement birth date, if supplied; normalized to UTC by type
    pub birth_date: Option<DateTime<Utc>>,
}

impl AuthorPatch {
    /// A patch addressing `id` with no fields supplied.
    pub fn empty(id: Uuid) -> Self {
        Self { id, ..Self::default() }
    }

    /// True when no field is supplied; applying such a patch is a no-op.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.birth_date.is_none()
    }
}
