//! Caching decorator for any [`QuoteProvider`].

use std::sync::Arc;

use async_trait::async_trait;

use super::{QuoteCache, QuoteProvider};
use crate::error::Result;
use crate::model::Quote;

/// Serves fresh cached quotes and stores every successful fetch.
///
/// Concurrent misses for the same ticker both go upstream; the later write
/// simply overwrites the earlier one.
pub struct CachedQuoteProvider {
    inner: Arc<dyn QuoteProvider>,
    cache: Arc<QuoteCache>,
}

impl CachedQuoteProvider {
    pub fn new(inner: Arc<dyn QuoteProvider>, cache: Arc<QuoteCache>) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &Arc<QuoteCache> {
        &self.cache
    }
}

#[async_trait]
impl QuoteProvider for CachedQuoteProvider {
    async fn fetch_quote(&self, ticker: &str) -> Result<Quote> {
        let symbol = ticker.trim().to_uppercase();

        if let Some(quote) = self.cache.get(&symbol).await {
            tracing::debug!(ticker = %symbol, "quote cache hit");
            return Ok(quote);
        }

        let quote = self.inner.fetch_quote(&symbol).await?;
        self.cache.insert(quote.clone()).await;
        Ok(quote)
    }

    async fn health_check(&self) -> bool {
        self.inner.health_check().await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
