//! Error types for catalog store operations.
use thiserror::Error;

/// Represents errors that can occur while reading the graph catalog.
///
/// `Unavailable` is the store's explicit "cannot answer at all" signal. It is
/// distinct from an empty result, which is never an error.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(sqlx::Error),

    #[error("Invalid catalog record: {0}")]
    InvalidRecord(String),
}

impl CatalogError {
    /// Create an unavailable error.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create an invalid record error.
    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::InvalidRecord(msg.into())
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => Self::Unavailable(err.to_string()),
            other => Self::DatabaseError(other),
        }
    }
}
