//! Application State

use std::sync::Arc;

use stock_advisor::{DebateCoach, MarketData};
use usage_ledger::UsageStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Quotes with per-ticker fallback
    pub market: MarketData,

    /// LLM-backed debate coach
    pub coach: DebateCoach,

    /// Usage counters and portfolio history
    pub usage: Arc<dyn UsageStore>,
}

impl AppState {
    pub fn new(market: MarketData, coach: DebateCoach, usage: Arc<dyn UsageStore>) -> Self {
        Self { market, coach, usage }
    }
}
