//! # stock-advisor
//!
//! Portfolio mirror, anti-advice oracle and debate coach for stock
//! allocations.
//!
//! ## Flow
//!
//! ```text
//! portfolio [{ticker, percentage}]
//!     │
//!     ├──▶ validate_portfolio ──▶ MarketData::enrich ──▶ EnrichedHolding[]
//!     │                             (live quote, or fallback per ticker)
//!     │                                     │
//!     │                 ┌───────────────────┼─────────────────────┐
//!     │                 ▼                   ▼                     ▼
//!     │          compute_metrics     generate_reflections   PortfolioAnalysis
//!     │                 │                   │
//!     │                 └───────▶ MirrorReport / AnalysisReport
//!     │
//!     └──▶ generate_warnings ──▶ OracleReport (no quotes needed)
//! ```
//!
//! ## Example
//!
//! ```text
//! TCS  60%  +20%   "Your past self would be excited ..."
//! INFY 40%   -5%   "Your past self would be concerned ..."
//!
//! weighted return = 20 × 0.6 + (-5) × 0.4 = +10%
//! ```

pub mod advice;
pub mod analysis;
pub mod coach;
pub mod error;
pub mod market;
pub mod metrics;
pub mod model;
pub mod quote;
pub mod report;

pub use analysis::PortfolioAnalysis;
pub use coach::{DebateCoach, DEBATE_COACH_PROMPT, FALLBACK_REPLY};
pub use error::{AdvisorError, Result};
pub use market::MarketData;
pub use metrics::compute_metrics;
pub use model::{Allocation, DataSource, EnrichedHolding, PortfolioMetrics, Quote, QuoteSource};
pub use quote::QuoteProvider;
pub use report::{AnalysisReport, MirrorReport, OracleReport};
