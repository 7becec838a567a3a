//! Fixed Quote Provider
//!
//! Serves quotes from an in-memory table. Used for offline runs and tests;
//! tickers missing from the table fail like an unreachable upstream would.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::QuoteProvider;
use crate::error::{AdvisorError, Result};
use crate::model::{Quote, QuoteSource};

/// Quote provider backed by a fixed table
#[derive(Default)]
pub struct FixedQuoteProvider {
    /// ticker → (price, one-year return %)
    table: HashMap<String, (Decimal, Decimal)>,
}

impl FixedQuoteProvider {
    /// Empty table: every lookup fails
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a ticker's row
    #[must_use]
    pub fn with_quote(mut self, ticker: &str, price: Decimal, percent_return: Decimal) -> Self {
        self.table.insert(ticker.trim().to_uppercase(), (price, percent_return));
        self
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[async_trait]
impl QuoteProvider for FixedQuoteProvider {
    async fn fetch_quote(&self, ticker: &str) -> Result<Quote> {
        let symbol = ticker.trim().to_uppercase();
        let &(price, percent_return) = self
            .table
            .get(&symbol)
            .ok_or_else(|| AdvisorError::UnsupportedTicker(symbol.clone()))?;

        Ok(Quote::new(symbol, price, percent_return, QuoteSource::Live))
    }

    async fn health_check(&self) -> bool {
        !self.table.is_empty()
    }

    fn name(&self) -> &str {
        "FixedTable"
    }
}
