//! Error types used throughout the catalog

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for catalog operations.
///
/// Business-rule violations are expected, caller-actionable outcomes and are
/// always returned, never panicked. An absent record on a lookup-by-key is
/// NOT an error; services model it as `Option` so callers can distinguish
/// "no such record" from an actual failure.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum CatalogError {
    /// Malformed caller input, e.g. a non-positive page number.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Uniqueness violation, e.g. a duplicate author email.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A referenced entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A store or cache collaborator failed; surfaced opaquely.
    #[error("Unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_preserve_offending_value() {
        let err = CatalogError::Conflict("Author with email 'ada@x.io' already exists.".into());
        assert!(err.to_string().contains("ada@x.io"));

        let err = CatalogError::NotFound("Author with ID 'abc' not found.".into());
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn errors_serialize_with_tag_and_content() {
        let err = CatalogError::InvalidArgument("page must be greater than zero".into());
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"type\":\"InvalidArgument\""));

        let back: CatalogError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }
}
