//! Error Types

use thiserror::Error;

/// Result type alias for coach operations
pub type Result<T> = std::result::Result<T, CoachError>;

/// Errors raised by LLM providers
#[derive(Error, Debug)]
pub enum CoachError {
    /// LLM provider error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unavailable or not responding
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Provider answered with no usable text
    #[error("Empty completion from {0}")]
    EmptyCompletion(String),
}
