//! Reports
//!
//! Response payloads for the mirror, oracle and analysis operations, and the
//! pipelines that build them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::advice::{generate_reflections, generate_warnings, portfolio_summary};
use crate::analysis::PortfolioAnalysis;
use crate::error::Result;
use crate::market::{data_source, MarketData};
use crate::metrics::compute_metrics;
use crate::model::{validate_portfolio, Allocation, DataSource, EnrichedHolding, PortfolioMetrics};

/// What the past self thinks of the portfolio
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MirrorReport {
    pub reflections: Vec<String>,
    pub summary: String,
    pub metrics: PortfolioMetrics,
    pub data_source: DataSource,
    pub last_updated: DateTime<Utc>,
}

impl MirrorReport {
    /// Build from already-enriched holdings
    pub fn from_holdings(holdings: &[EnrichedHolding]) -> Result<Self> {
        let metrics = compute_metrics(holdings)?;
        Ok(Self {
            reflections: generate_reflections(holdings),
            summary: portfolio_summary(&metrics),
            metrics,
            data_source: data_source(holdings),
            last_updated: Utc::now(),
        })
    }

    /// Validate, quote and summarize a submitted portfolio
    pub async fn generate(market: &MarketData, portfolio: Vec<Allocation>) -> Result<Self> {
        let portfolio = validate_portfolio(portfolio)?;
        let holdings = market.enrich(&portfolio).await;
        let report = Self::from_holdings(&holdings)?;

        tracing::info!(
            holdings = report.metrics.holding_count,
            weighted_return = %report.metrics.weighted_return,
            data_source = %report.data_source,
            "mirror report generated"
        );
        Ok(report)
    }
}

/// Anti-advice for a portfolio
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OracleReport {
    pub warnings: Vec<String>,
}

impl OracleReport {
    /// Rules run on the raw allocations; an empty portfolio is fine
    pub fn generate(portfolio: &[Allocation]) -> Self {
        let normalized: Vec<Allocation> =
            portfolio.iter().cloned().map(Allocation::normalized).collect();
        Self {
            warnings: generate_warnings(&normalized),
        }
    }
}

/// Holdings, metrics and classification in one payload
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub portfolio: Vec<EnrichedHolding>,
    pub metrics: PortfolioMetrics,
    pub analysis: PortfolioAnalysis,
    pub data_source: DataSource,
    pub timestamp: DateTime<Utc>,
}

impl AnalysisReport {
    pub fn from_holdings(holdings: Vec<EnrichedHolding>) -> Result<Self> {
        let metrics = compute_metrics(&holdings)?;
        let analysis = PortfolioAnalysis::from_metrics(&metrics);
        let data_source = data_source(&holdings);
        Ok(Self {
            portfolio: holdings,
            metrics,
            analysis,
            data_source,
            timestamp: Utc::now(),
        })
    }

    pub async fn generate(market: &MarketData, portfolio: Vec<Allocation>) -> Result<Self> {
        let portfolio = validate_portfolio(portfolio)?;
        let holdings = market.enrich(&portfolio).await;
        Self::from_holdings(holdings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advice::GENERAL_WARNINGS;
    use crate::analysis::{Diversification, Performance, Recommendation, RiskLevel};
    use crate::quote::{FallbackQuotes, FixedQuoteProvider};
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn market() -> MarketData {
        let provider = FixedQuoteProvider::new()
            .with_quote("TCS", dec!(3600), dec!(20))
            .with_quote("INFY", dec!(1400), dec!(-5));
        MarketData::new(Arc::new(provider), Arc::new(FallbackQuotes::deterministic()))
    }

    #[tokio::test]
    async fn test_mirror_report() {
        let portfolio = vec![
            Allocation::new("TCS", dec!(60)),
            Allocation::new("INFY", dec!(40)),
        ];
        let report = MirrorReport::generate(&market(), portfolio).await.unwrap();

        assert_eq!(report.reflections.len(), 2);
        assert!(report.reflections[0].starts_with("Your past self would be excited"));
        assert!(report.reflections[1].starts_with("Your past self would be concerned"));
        assert_eq!(report.metrics.weighted_return, dec!(10));
        assert_eq!(report.data_source, DataSource::Live);
        assert_eq!(
            report.summary,
            "Portfolio Summary: 2 stocks, 100% allocated, +10% weighted return. Best performer: TCS (+20%), Worst: INFY (-5%)."
        );
    }

    #[tokio::test]
    async fn test_mirror_rejects_empty_portfolio() {
        let err = MirrorReport::generate(&market(), Vec::new()).await.unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(err.user_message(), "Portfolio array is required");
    }

    #[tokio::test]
    async fn test_mirror_rejects_negative_percentage() {
        let err = MirrorReport::generate(&market(), vec![Allocation::new("TCS", dec!(-10))])
            .await
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_oracle_on_empty_portfolio() {
        let report = OracleReport::generate(&[]);
        // too few holdings and too little allocated, then the general three
        assert_eq!(report.warnings.len(), 5);
        assert!(report.warnings[0].contains("0 basket(s)"));
        assert!(report.warnings[1].contains("0% total allocation"));
        assert_eq!(&report.warnings[2..], &GENERAL_WARNINGS.map(String::from));
    }

    #[test]
    fn test_oracle_normalizes_tickers() {
        let portfolio = vec![Allocation {
            ticker: " tcs ".into(),
            percentage: dec!(45),
        }];
        let report = OracleReport::generate(&portfolio);
        assert!(report.warnings[0].contains(" TCS"));
    }

    #[tokio::test]
    async fn test_analysis_report() {
        let portfolio = vec![
            Allocation::new("TCS", dec!(60)),
            Allocation::new("INFY", dec!(40)),
        ];
        let report = AnalysisReport::generate(&market(), portfolio).await.unwrap();

        assert_eq!(report.portfolio.len(), 2);
        assert_eq!(report.analysis.risk_level, RiskLevel::Moderate);
        assert_eq!(report.analysis.recommendation, Recommendation::ConsiderRebalancing);
        assert_eq!(report.analysis.diversification, Diversification::NeedsMore);
        assert_eq!(report.analysis.performance, Performance::Positive);
    }
}
