//! Error types for TrapiHaus

use thiserror::Error;

/// Main error type for session and storage operations
#[derive(Error, Debug)]
pub enum SessionError {
    /// Database creation/opening error
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    /// Transaction error
    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    /// Table error
    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    /// Storage operation error
    #[error("Storage operation error: {0}")]
    StorageOp(#[from] redb::StorageError),

    /// Commit error
    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Storage backend failed outside of redb (worker panic, unavailable store)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Session looked up outside of the provider that owns it
    #[error("Session accessed outside of its provider; wrap the tree in SessionProvider")]
    MissingProvider,

    /// The owner of the gate went away before the initial load finished
    #[error("Session gate torn down before load completed")]
    TornDown,
}

impl From<tokio::task::JoinError> for SessionError {
    fn from(err: tokio::task::JoinError) -> Self {
        SessionError::Storage(format!("storage task failed: {}", err))
    }
}

/// Result type alias using SessionError
pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SessionError::Storage("disk full".to_string());
        assert_eq!(format!("{}", err), "Storage error: disk full");
    }

    #[test]
    fn test_missing_provider_is_distinct() {
        let err = SessionError::MissingProvider;
        assert!(err.to_string().contains("SessionProvider"));
        assert!(!matches!(err, SessionError::Storage(_)));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: SessionError = io_err.into();
        assert!(matches!(err, SessionError::Io(_)));
    }
}
