//! Error types for pagefeed.
//!
//! Only failures that abort a listing request live here. Unknown tags,
//! authors, or favoriting users are valid empty outcomes, and an undecodable
//! cursor is silently treated as absent; neither is represented as an error.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::UserId;

/// The unified error type for pagefeed operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A required identity could not be resolved.
    #[error("not found: {0}")]
    NotFound(#[from] NotFoundError),

    /// The persistence collaborator failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Input validation errors (invalid username, tag).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Check if this error is a fatal not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

/// Entities whose absence fails the request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotFoundError {
    /// The current user of a feed request does not exist.
    #[error("user {id} not found")]
    User { id: UserId },
}

/// Failures of the underlying store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("IO error: {message}")]
    Io { message: String },

    /// A stored document could not be decoded.
    #[error("corrupt entry {}: {message}", path.display())]
    Corrupt { path: PathBuf, message: String },
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Storage(StorageError::from(err))
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid username format.
    #[error("invalid username '{value}': {reason}")]
    Username { value: String, reason: String },

    /// Invalid tag format.
    #[error("invalid tag '{value}': {reason}")]
    Tag { value: String, reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_names_the_user() {
        let err: Error = NotFoundError::User { id: UserId::new(42) }.into();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "not found: user 42 not found");
    }

    #[test]
    fn io_errors_become_storage_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::from(io);
        assert!(matches!(err, Error::Storage(StorageError::Io { .. })));
        assert!(!err.is_not_found());
    }
}
