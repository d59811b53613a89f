use thiserror::Error;

#[derive(Debug, Error)]
/// Represents errors that can occur while resolving a user's accessible groups.
///
/// An unknown user or a user without matching profiles is not an error: the
/// resolver answers with an empty set.
pub enum GroupResolverError {
    #[error("Invalid privileges: {0}")]
    InvalidPrivileges(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}
