//! Usage Store
//!
//! Per-user usage counters and the history of submitted portfolios.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use uuid::Uuid;

use crate::error::{LedgerError, Result};

const MAX_USER_ID_LEN: usize = 128;

/// Opaque client-chosen user id (e.g. `user_k3j9x0a1b_1718000000000`)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Parse and check a user id: 1-128 chars of `[A-Za-z0-9_-.]`
    pub fn parse(raw: &str) -> Result<Self> {
        let id = raw.trim();
        if id.is_empty() {
            return Err(LedgerError::InvalidUserId("user id is empty".into()));
        }
        if id.len() > MAX_USER_ID_LEN {
            return Err(LedgerError::InvalidUserId(format!(
                "user id longer than {MAX_USER_ID_LEN} characters"
            )));
        }
        if !id.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')) {
            return Err(LedgerError::InvalidUserId(format!("unexpected characters in '{id}'")));
        }
        Ok(Self(id.to_string()))
    }

    /// Generate a fresh id of the form `user_<9 hex>_<unix millis>`
    pub fn generate() -> Self {
        let hex = Uuid::new_v4().simple().to_string();
        Self(format!("user_{}_{}", &hex[..9], Utc::now().timestamp_millis()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Usage counter for one user
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUsage {
    pub user_id: UserId,
    pub usage_count: u64,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl UserUsage {
    fn new(user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            usage_count: 0,
            created_at: now,
            last_updated: now,
        }
    }
}

/// One saved (ticker, percentage) row
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEntry {
    pub ticker: String,
    pub percentage: Decimal,
}

/// A portfolio as submitted at some point in time
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioRecord {
    pub id: Uuid,
    pub user_id: UserId,
    pub portfolio: Vec<StockEntry>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// Usage storage trait
pub trait UsageStore: Send + Sync {
    /// Count one use; returns the new total
    fn increment_usage(&self, user_id: &UserId) -> Result<u64>;

    /// Current usage, `None` for a user never seen
    fn usage(&self, user_id: &UserId) -> Result<Option<UserUsage>>;

    /// Append a portfolio to the user's history
    fn save_portfolio(
        &self,
        user_id: &UserId,
        portfolio: Vec<StockEntry>,
        user_agent: Option<String>,
    ) -> Result<PortfolioRecord>;

    /// Saved portfolios, oldest first
    fn history(&self, user_id: &UserId) -> Result<Vec<PortfolioRecord>>;

    /// Usage count, 0 for a user never seen
    fn usage_count(&self, user_id: &UserId) -> Result<u64> {
        Ok(self.usage(user_id)?.map_or(0, |u| u.usage_count))
    }
}

fn poisoned<T>(_: PoisonError<T>) -> LedgerError {
    LedgerError::Storage("lock poisoned".into())
}

/// In-memory usage store; contents live as long as the process
#[derive(Default)]
pub struct MemoryUsageStore {
    users: RwLock<HashMap<UserId, UserUsage>>,
    portfolios: RwLock<HashMap<UserId, Vec<PortfolioRecord>>>,
}

impl MemoryUsageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UsageStore for MemoryUsageStore {
    fn increment_usage(&self, user_id: &UserId) -> Result<u64> {
        let mut users = self.users.write().map_err(poisoned)?;

        let usage = users
            .entry(user_id.clone())
            .or_insert_with(|| UserUsage::new(user_id.clone()));
        usage.usage_count += 1;
        usage.last_updated = Utc::now();

        tracing::debug!(user_id = %user_id, count = usage.usage_count, "usage incremented");
        Ok(usage.usage_count)
    }

    fn usage(&self, user_id: &UserId) -> Result<Option<UserUsage>> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.get(user_id).cloned())
    }

    fn save_portfolio(
        &self,
        user_id: &UserId,
        portfolio: Vec<StockEntry>,
        user_agent: Option<String>,
    ) -> Result<PortfolioRecord> {
        let record = PortfolioRecord {
            id: Uuid::new_v4(),
            user_id: user_id.clone(),
            portfolio,
            timestamp: Utc::now(),
            user_agent,
        };

        let mut portfolios = self.portfolios.write().map_err(poisoned)?;
        portfolios.entry(user_id.clone()).or_default().push(record.clone());
        Ok(record)
    }

    fn history(&self, user_id: &UserId) -> Result<Vec<PortfolioRecord>> {
        let portfolios = self.portfolios.read().map_err(poisoned)?;
        Ok(portfolios.get(user_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn user(id: &str) -> UserId {
        UserId::parse(id).unwrap()
    }

    #[test]
    fn test_user_id_parsing() {
        assert_eq!(user("  user_abc_123 ").as_str(), "user_abc_123");
        assert!(UserId::parse("").is_err());
        assert!(UserId::parse("   ").is_err());
        assert!(UserId::parse("has space").is_err());
        assert!(UserId::parse(&"x".repeat(129)).is_err());
    }

    #[test]
    fn test_user_id_generation() {
        let id = UserId::generate();
        assert!(id.as_str().starts_with("user_"));
        assert_eq!(id.as_str().matches('_').count(), 2);
        assert!(UserId::parse(id.as_str()).is_ok());
        assert_ne!(id, UserId::generate());
    }

    #[test]
    fn test_usage_counting() {
        let store = MemoryUsageStore::new();
        let alice = user("alice");

        assert_eq!(store.usage_count(&alice).unwrap(), 0);
        assert!(store.usage(&alice).unwrap().is_none());

        assert_eq!(store.increment_usage(&alice).unwrap(), 1);
        assert_eq!(store.increment_usage(&alice).unwrap(), 2);
        assert_eq!(store.usage_count(&alice).unwrap(), 2);

        // other users are unaffected
        assert_eq!(store.usage_count(&user("bob")).unwrap(), 0);
    }

    #[test]
    fn test_history_is_append_only_and_ordered() {
        let store = MemoryUsageStore::new();
        let alice = user("alice");

        let first = vec![StockEntry { ticker: "TCS".into(), percentage: dec!(60) }];
        let second = vec![StockEntry { ticker: "INFY".into(), percentage: dec!(40) }];

        store.save_portfolio(&alice, first.clone(), Some("curl/8.0".into())).unwrap();
        store.save_portfolio(&alice, second.clone(), None).unwrap();

        let history = store.history(&alice).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].portfolio, first);
        assert_eq!(history[1].portfolio, second);
        assert_eq!(history[0].user_agent.as_deref(), Some("curl/8.0"));
        assert!(history[0].timestamp <= history[1].timestamp);
        assert_ne!(history[0].id, history[1].id);

        assert!(store.history(&user("bob")).unwrap().is_empty());
    }
}
