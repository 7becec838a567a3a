//! Domain Models
//!
//! Allocations submitted by the user, quotes from the market-data layer and
//! the transient join of the two. All numbers are `rust_decimal::Decimal`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};

/// A user-declared (ticker, percentage) pair
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Ticker symbol (e.g., "TCS", "INFY")
    #[serde(default)]
    pub ticker: String,

    /// Share of the portfolio in percent; missing values read as 0
    #[serde(default)]
    pub percentage: Decimal,
}

impl Allocation {
    pub fn new(ticker: impl Into<String>, percentage: Decimal) -> Self {
        Self {
            ticker: normalize_ticker(&ticker.into()),
            percentage,
        }
    }

    /// Trim and uppercase the ticker, leaving the percentage untouched
    #[must_use]
    pub fn normalized(self) -> Self {
        Self::new(self.ticker, self.percentage)
    }

    /// Check the allocation is usable for quote lookup and metrics
    pub fn validate(&self) -> Result<()> {
        if self.ticker.is_empty() {
            return Err(AdvisorError::InvalidInput("Ticker must not be empty".into()));
        }
        if self.percentage < Decimal::ZERO {
            return Err(AdvisorError::InvalidInput(format!(
                "Percentage for {} must be zero or greater, got {}",
                self.ticker, self.percentage
            )));
        }
        Ok(())
    }
}

fn normalize_ticker(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Normalize and validate a submitted portfolio.
///
/// Order is preserved and duplicate tickers are allowed. An empty portfolio
/// is rejected since best/worst performer is undefined for it.
pub fn validate_portfolio(portfolio: Vec<Allocation>) -> Result<Vec<Allocation>> {
    if portfolio.is_empty() {
        return Err(AdvisorError::InvalidInput("Portfolio array is required".into()));
    }

    let normalized: Vec<Allocation> = portfolio.into_iter().map(Allocation::normalized).collect();
    for allocation in &normalized {
        allocation.validate()?;
    }
    Ok(normalized)
}

/// Where a single quote came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteSource {
    /// Fetched from the market-data provider
    Live,
    /// Substituted from the fallback table
    Fallback,
}

/// Provenance of a whole set of quotes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Fallback,
    Mixed,
}

impl DataSource {
    /// Combine per-holding sources into one label
    pub fn of<'a>(sources: impl IntoIterator<Item = &'a QuoteSource>) -> Self {
        let mut live = false;
        let mut fallback = false;
        for source in sources {
            match source {
                QuoteSource::Live => live = true,
                QuoteSource::Fallback => fallback = true,
            }
        }
        match (live, fallback) {
            (true, true) => Self::Mixed,
            (false, true) => Self::Fallback,
            _ => Self::Live,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Fallback => "fallback",
            Self::Mixed => "mixed",
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point-in-time price and trailing one-year return for a ticker
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub ticker: String,

    /// Latest price, never negative
    pub price: Decimal,

    /// Trailing return in percent (12 means +12%)
    pub percent_return: Decimal,

    pub source: QuoteSource,

    pub fetched_at: DateTime<Utc>,
}

impl Quote {
    pub fn new(
        ticker: impl Into<String>,
        price: Decimal,
        percent_return: Decimal,
        source: QuoteSource,
    ) -> Self {
        Self {
            ticker: normalize_ticker(&ticker.into()),
            price: price.max(Decimal::ZERO),
            percent_return,
            source,
            fetched_at: Utc::now(),
        }
    }

    pub const fn is_live(&self) -> bool {
        matches!(self.source, QuoteSource::Live)
    }
}

/// An allocation joined with its quote, alive for one computation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedHolding {
    pub ticker: String,
    pub percentage: Decimal,
    pub price: Decimal,
    pub percent_return: Decimal,
    pub source: QuoteSource,
}

impl EnrichedHolding {
    /// Join an allocation with its quote; the allocation's ticker wins
    pub fn new(allocation: &Allocation, quote: &Quote) -> Self {
        Self {
            ticker: allocation.ticker.clone(),
            percentage: allocation.percentage,
            price: quote.price,
            percent_return: quote.percent_return,
            source: quote.source,
        }
    }
}

/// Aggregate statistics over a non-empty set of holdings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioMetrics {
    /// Sum of percentages, neither capped nor normalized
    pub total_allocation: Decimal,

    /// Σ return × percentage / 100, rounded to one decimal
    pub weighted_return: Decimal,

    pub best_performer: EnrichedHolding,

    pub worst_performer: EnrichedHolding,

    pub holding_count: usize,

    /// Unweighted mean return, rounded to one decimal
    pub average_return: Decimal,
}
