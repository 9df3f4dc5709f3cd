//! Error types for booklend
//!
//! Provides a unified error type for all operations. Validation variants
//! double as the console messages the shell prints.

use thiserror::Error;

use crate::storage::CollectionKind;

/// Result type alias using LibraryError
pub type Result<T> = std::result::Result<T, LibraryError>;

/// Unified error type for booklend operations
#[derive(Debug, Error)]
pub enum LibraryError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Backing Store Errors
    // -------------------------------------------------------------------------
    #[error("Malformed {kind} store: {source}")]
    Deserialization {
        kind: CollectionKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not encode {kind} store: {source}")]
    Serialization {
        kind: CollectionKind,
        #[source]
        source: serde_json::Error,
    },

    // -------------------------------------------------------------------------
    // Input Errors (recoverable, prompt is re-issued)
    // -------------------------------------------------------------------------
    #[error("{0}")]
    InputFormat(String),

    // -------------------------------------------------------------------------
    // Validation Errors (recoverable, operation is abandoned)
    // -------------------------------------------------------------------------
    #[error("There are no books.")]
    NoBooksAvailable,

    #[error("You cannot have more than {max} books at once.\nReturn the book to receive a new one.")]
    LoanLimitReached { max: usize },

    #[error("You do not have any books, so you cannot return anything.")]
    NoLoansHeld,

    #[error("No book found with ISBN: {0} in database")]
    IsbnNotFound(String),

    #[error("No books in the library fitting this criteria.")]
    NothingMatches,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LibraryError {
    /// True for errors the shell reports and recovers from
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            LibraryError::InputFormat(_)
                | LibraryError::NoBooksAvailable
                | LibraryError::LoanLimitReached { .. }
                | LibraryError::NoLoansHeld
                | LibraryError::IsbnNotFound(_)
                | LibraryError::NothingMatches
        )
    }
}
