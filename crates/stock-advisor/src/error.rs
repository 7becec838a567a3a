//! Error Types for the Stock Advisor

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Error, Debug)]
pub enum AdvisorError {
    /// Malformed or missing portfolio input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Metrics requested for zero holdings
    #[error("Portfolio has no holdings")]
    EmptyPortfolio,

    /// Quote or chat provider failed; recovered by fallback data
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Ticker not supported: {0}")]
    UnsupportedTicker(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl AdvisorError {
    /// Errors the caller caused and can fix (4xx territory)
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::EmptyPortfolio)
    }

    /// Message safe to show an end user
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(msg) => msg.clone(),
            Self::EmptyPortfolio => "Portfolio must contain at least one holding".into(),
            _ => "Internal server error".into(),
        }
    }
}
