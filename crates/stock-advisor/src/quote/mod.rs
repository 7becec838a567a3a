//! Quote Sources
//!
//! Abstractions and implementations for market-data providers.
//!
//! ```text
//! MarketData ──▶ CachedQuoteProvider ──▶ AlphaVantageClient (live)
//!     │               │
//!     │               └── QuoteCache (ticker → quote, absolute-age expiry)
//!     │
//!     └── on any error ──▶ FallbackQuotes (fixed table, optional seeded jitter)
//! ```

mod alpha_vantage;
mod cache;
mod cached;
mod fallback;
mod fixed;

pub use alpha_vantage::{AlphaVantageClient, AlphaVantageConfig};
pub use cache::QuoteCache;
pub use cached::CachedQuoteProvider;
pub use fallback::FallbackQuotes;
pub use fixed::FixedQuoteProvider;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::Quote;

/// Quote provider trait (Strategy pattern)
///
/// Implementations may fail for any reason; callers substitute fallback data.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Latest price and trailing one-year return for a ticker
    async fn fetch_quote(&self, ticker: &str) -> Result<Quote>;

    /// Check if the provider is reachable
    async fn health_check(&self) -> bool;

    /// Provider name
    fn name(&self) -> &str;
}
