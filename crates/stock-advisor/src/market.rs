//! Market Data
//!
//! Joins allocations with quotes. A provider failure never surfaces to the
//! caller: the ticker is served from the fallback table instead and labeled
//! as such.

use std::sync::Arc;

use futures::future::join_all;

use crate::model::{Allocation, DataSource, EnrichedHolding, Quote};
use crate::quote::{FallbackQuotes, QuoteProvider};

#[derive(Clone)]
pub struct MarketData {
    provider: Arc<dyn QuoteProvider>,
    fallback: Arc<FallbackQuotes>,
}

impl MarketData {
    pub fn new(provider: Arc<dyn QuoteProvider>, fallback: Arc<FallbackQuotes>) -> Self {
        Self { provider, fallback }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub async fn provider_healthy(&self) -> bool {
        self.provider.health_check().await
    }

    /// Quote for one ticker, live when possible
    pub async fn quote(&self, ticker: &str) -> Quote {
        match self.provider.fetch_quote(ticker).await {
            Ok(quote) => quote,
            Err(e) => {
                tracing::warn!(
                    ticker = %ticker,
                    provider = %self.provider.name(),
                    error = %e,
                    "quote fetch failed, using fallback data"
                );
                self.fallback.quote(ticker)
            }
        }
    }

    /// Quote every allocation concurrently; output order matches input order
    pub async fn enrich(&self, portfolio: &[Allocation]) -> Vec<EnrichedHolding> {
        let quotes = join_all(portfolio.iter().map(|a| self.quote(&a.ticker))).await;

        portfolio
            .iter()
            .zip(quotes.iter())
            .map(|(allocation, quote)| EnrichedHolding::new(allocation, quote))
            .collect()
    }
}

/// Provenance label for a set of enriched holdings
pub fn data_source(holdings: &[EnrichedHolding]) -> DataSource {
    DataSource::of(holdings.iter().map(|h| &h.source))
}
