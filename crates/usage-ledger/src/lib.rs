//! # usage-ledger
//!
//! Usage tracking and portfolio history for the portfolio mirror.
//!
//! ```text
//! ┌─────────────┐  increment_usage   ┌──────────────────────────┐
//! │  Mirror /   │───────────────────▶│  UsageStore              │
//! │  /api/usage │  save_portfolio    │  ├─ users: id → count    │
//! └─────────────┘───────────────────▶│  └─ portfolios: id → [..]│
//!                                    └──────────────────────────┘
//! ```
//!
//! User ids are opaque strings chosen by the client; nothing here
//! authenticates them.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use usage_ledger::{MemoryUsageStore, UsageStore, UserId};
//!
//! let store = MemoryUsageStore::new();
//! let user = UserId::parse("user_k3j9x0a1b_1718000000000")?;
//! let count = store.increment_usage(&user)?;
//! ```

mod error;
mod store;

pub use error::{LedgerError, Result};
pub use store::{MemoryUsageStore, PortfolioRecord, StockEntry, UsageStore, UserId, UserUsage};
