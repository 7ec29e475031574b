//! Conversions from external infrastructure errors into domain errors.

use folio_domain::CatalogError;

/// Error newtype that keeps conversions on the infrastructure side and can
/// be converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub CatalogError);

impl From<InfraError> for CatalogError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<rusqlite::Error> for InfraError {
    fn from(err: rusqlite::Error) -> Self {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        let mapped = match err {
            RE::SqliteFailure(code, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (code.code, code.extended_code) {
                    // SQLITE_CONSTRAINT_UNIQUE
                    (ErrorCode::ConstraintViolation, 2067) => {
                        CatalogError::Conflict(format!("unique constraint violation: {message}"))
                    }
                    // SQLITE_CONSTRAINT_FOREIGNKEY
                    (ErrorCode::ConstraintViolation, 787) => CatalogError::InvalidArgument(
                        format!("foreign key constraint violation: {message}"),
                    ),
                    (ErrorCode::DatabaseBusy, _) => {
                        CatalogError::Unavailable("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        CatalogError::Unavailable("database is locked".into())
                    }
                    _ => CatalogError::Unavailable(format!(
                        "sqlite failure {:?} (code {}): {message}",
                        code.code, code.extended_code
                    )),
                }
            }
            RE::QueryReturnedNoRows => {
                CatalogError::NotFound("no rows returned by query".into())
            }
            other => CatalogError::Unavailable(other.to_string()),
        };

        Self(mapped)
    }
}

impl From<r2d2::Error> for InfraError {
    fn from(err: r2d2::Error) -> Self {
        Self(CatalogError::Unavailable(format!("connection pool error: {err}")))
    }
}

/// Map a rusqlite error straight into the domain error.
pub(crate) fn map_sql_error(err: rusqlite::Error) -> CatalogError {
    InfraError::from(err).into()
}

/// Map a background-task join failure into the domain error.
pub(crate) fn map_join_error(err: tokio::task::JoinError) -> CatalogError {
    CatalogError::Unavailable(format!("database task failed: {err}"))
}

/// True when the error is the unique-index violation raised by a duplicate
/// author email; the repository rewrites it into the caller-facing conflict.
pub(crate) fn is_unique_violation(err: &CatalogError) -> bool {
    matches!(err, CatalogError::Conflict(msg) if msg.contains("unique constraint"))
}
