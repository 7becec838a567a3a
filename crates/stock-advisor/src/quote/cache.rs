//! Quote Cache
//!
//! Ticker → (quote, fetched-at) map with absolute-age expiry. There is no
//! LRU: an entry is served until it is older than the TTL. Reads ignore
//! expired entries; every write evicts them.

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;

use crate::model::Quote;

/// Default time-to-live for cached quotes
pub const DEFAULT_TTL_SECS: i64 = 5 * 60;

#[derive(Clone, Debug)]
struct CachedQuote {
    quote: Quote,
    fetched_at: DateTime<Utc>,
}

/// Process-lifetime cache of successful quote fetches
pub struct QuoteCache {
    ttl: TimeDelta,
    entries: RwLock<HashMap<String, CachedQuote>>,
}

impl Default for QuoteCache {
    fn default() -> Self {
        Self::new(TimeDelta::seconds(DEFAULT_TTL_SECS))
    }
}

impl QuoteCache {
    pub fn new(ttl: TimeDelta) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_ttl_secs(secs: u64) -> Self {
        Self::new(TimeDelta::seconds(i64::try_from(secs).unwrap_or(DEFAULT_TTL_SECS)))
    }

    pub const fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// Fresh quote for the ticker, if any
    pub async fn get(&self, ticker: &str) -> Option<Quote> {
        self.get_at(ticker, Utc::now()).await
    }

    /// Fresh quote for the ticker as seen at `now`
    pub async fn get_at(&self, ticker: &str, now: DateTime<Utc>) -> Option<Quote> {
        let entries = self.entries.read().await;
        entries
            .get(ticker)
            .filter(|cached| now - cached.fetched_at < self.ttl)
            .map(|cached| cached.quote.clone())
    }

    /// Store a quote fetched just now
    pub async fn insert(&self, quote: Quote) {
        self.insert_at(quote, Utc::now()).await;
    }

    /// Store a quote with an explicit fetch time, evicting anything expired by then
    pub async fn insert_at(&self, quote: Quote, fetched_at: DateTime<Utc>) {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, cached| fetched_at - cached.fetched_at < self.ttl);
        let evicted = before - entries.len();
        if evicted > 0 {
            tracing::debug!(evicted, "evicted expired quotes");
        }
        entries.insert(quote.ticker.clone(), CachedQuote { quote, fetched_at });
    }

    /// Number of stored entries, fresh or not
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuoteSource;
    use rust_decimal_macros::dec;

    fn quote(ticker: &str) -> Quote {
        Quote::new(ticker, dec!(100), dec!(4), QuoteSource::Live)
    }

    #[tokio::test]
    async fn test_hit_before_expiry() {
        let cache = QuoteCache::new(TimeDelta::minutes(5));
        let t0 = Utc::now();
        cache.insert_at(quote("ITC"), t0).await;

        let hit = cache.get_at("ITC", t0 + TimeDelta::minutes(4)).await;
        assert_eq!(hit.map(|q| q.ticker), Some("ITC".to_string()));
    }

    #[tokio::test]
    async fn test_miss_at_and_after_expiry() {
        let cache = QuoteCache::new(TimeDelta::minutes(5));
        let t0 = Utc::now();
        cache.insert_at(quote("ITC"), t0).await;

        assert!(cache.get_at("ITC", t0 + TimeDelta::minutes(5)).await.is_none());
        assert!(cache.get_at("ITC", t0 + TimeDelta::hours(1)).await.is_none());
        // reads ignore expired entries without evicting them
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_overwrite_refreshes_entry() {
        let cache = QuoteCache::new(TimeDelta::minutes(5));
        let t0 = Utc::now();
        cache.insert_at(quote("LT"), t0).await;
        cache.insert_at(quote("LT"), t0 + TimeDelta::minutes(10)).await;

        assert!(cache.get_at("LT", t0 + TimeDelta::minutes(12)).await.is_some());
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_insert_evicts_expired_entries() {
        let cache = QuoteCache::default();
        let t0 = Utc::now();
        cache.insert_at(quote("OLD"), t0 - TimeDelta::minutes(30)).await;
        cache.insert_at(quote("RECENT"), t0 - TimeDelta::minutes(1)).await;
        cache.insert_at(quote("NEW"), t0).await;

        assert_eq!(cache.len().await, 2);
        assert!(cache.get_at("NEW", t0).await.is_some());
        assert!(cache.get_at("RECENT", t0).await.is_some());
    }

    #[test]
    fn test_ttl_from_secs() {
        assert_eq!(QuoteCache::with_ttl_secs(60).ttl(), TimeDelta::seconds(60));
        assert_eq!(QuoteCache::default().ttl(), TimeDelta::seconds(300));
    }
}
