/// Write failure classification
///
/// Inserts can fail in two ways the web layer reports differently: a value
/// collides with a `UNIQUE` column, or anything else goes wrong in the store.
/// Both variants carry the message SQLite produced.

use thiserror::Error;

/// Error returned by model `create` operations
#[derive(Debug, Error)]
pub enum WriteError {
    /// A unique column (username, email) already holds the value
    #[error("{0}")]
    Duplicate(String),

    /// Any other storage failure
    #[error("{0}")]
    Storage(String),
}

impl WriteError {
    /// Whether this error is a uniqueness-constraint violation
    pub fn is_duplicate(&self) -> bool {
        matches!(self, WriteError::Duplicate(_))
    }
}

impl From<sqlx::Error> for WriteError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                WriteError::Duplicate(db_err.message().to_string())
            }
            sqlx::Error::Database(db_err) => WriteError::Storage(db_err.message().to_string()),
            _ => WriteError::Storage(err.to_string()),
        }
    }
}
