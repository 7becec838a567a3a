//! Ledger Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Usage and history errors
#[derive(Error, Debug)]
pub enum LedgerError {
    /// User id missing or malformed
    #[error("Invalid user id: {0}")]
    InvalidUserId(String),

    /// Backing store failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    /// Check if the caller can fix this error
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidUserId(_))
    }

    /// Get user-friendly message
    pub const fn user_message(&self) -> &str {
        match self {
            Self::InvalidUserId(_) => "A valid userId is required.",
            Self::Storage(_) => "Failed to track usage",
        }
    }
}
