use rusqlite::ErrorCode;
use thiserror::Error;

/// Failures of the user directory and the exercise log store.
///
/// A missing user is not one of these, lookups return `None` instead.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("username {username:?} already exists")]
    DuplicateUsername { username: String },
    #[error("limit must be a positive integer, got {limit}")]
    InvalidLimit { limit: i64 },
    #[error("store failure: {0}")]
    StoreFailure(#[from] rusqlite::Error),
}

/// True when sqlite rejected a write because of a UNIQUE constraint
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => {
            e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        }
        _ => false,
    }
}
