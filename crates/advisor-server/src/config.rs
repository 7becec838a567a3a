//! Server configuration, read from the environment.

use std::sync::Arc;

use stock_advisor::quote::{
    AlphaVantageClient, AlphaVantageConfig, CachedQuoteProvider, FallbackQuotes,
    FixedQuoteProvider, QuoteCache,
};
use stock_advisor::{MarketData, QuoteProvider, Result};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";
const DEFAULT_CHAT_MODEL: &str = "llama3.2";
const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Which quote provider sits in front of the fallback table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuoteSourceKind {
    /// Alpha Vantage daily series
    AlphaVantage,
    /// No upstream; every ticker is served from the fallback table
    Static,
}

impl QuoteSourceKind {
    /// Unrecognized values select the live source
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "static" | "offline" => Self::Static,
            _ => Self::AlphaVantage,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub quote_source: QuoteSourceKind,
    pub quote_cache_ttl_secs: u64,
    /// Seed for fallback jitter; `None` keeps fallback values fixed
    pub fallback_jitter_seed: Option<u64>,
    pub chat_model: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.into(),
            quote_source: QuoteSourceKind::AlphaVantage,
            quote_cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            fallback_jitter_seed: None,
            chat_model: DEFAULT_CHAT_MODEL.into(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            quote_source: std::env::var("QUOTE_SOURCE")
                .map(|s| QuoteSourceKind::parse(&s))
                .unwrap_or(defaults.quote_source),
            quote_cache_ttl_secs: std::env::var("QUOTE_CACHE_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.quote_cache_ttl_secs),
            fallback_jitter_seed: std::env::var("FALLBACK_JITTER_SEED")
                .ok()
                .and_then(|s| s.parse().ok()),
            chat_model: std::env::var("CHAT_MODEL").unwrap_or(defaults.chat_model),
        }
    }

    pub fn fallback_quotes(&self) -> FallbackQuotes {
        self.fallback_jitter_seed
            .map_or_else(FallbackQuotes::deterministic, FallbackQuotes::jittered)
    }

    /// Assemble the quote chain: provider → cache → fallback
    pub fn market_data(&self) -> Result<MarketData> {
        let upstream: Arc<dyn QuoteProvider> = match self.quote_source {
            QuoteSourceKind::AlphaVantage => {
                Arc::new(AlphaVantageClient::new(AlphaVantageConfig::from_env())?)
            }
            QuoteSourceKind::Static => Arc::new(FixedQuoteProvider::new()),
        };

        let cache = Arc::new(QuoteCache::with_ttl_secs(self.quote_cache_ttl_secs));
        let provider = Arc::new(CachedQuoteProvider::new(upstream, cache));
        Ok(MarketData::new(provider, Arc::new(self.fallback_quotes())))
    }
}
