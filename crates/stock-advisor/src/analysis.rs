//! Portfolio classification from aggregate metrics.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::model::PortfolioMetrics;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "High Risk, High Reward")]
    HighRiskHighReward,
    #[serde(rename = "Moderate Risk")]
    Moderate,
    #[serde(rename = "Conservative")]
    Conservative,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diversification {
    #[serde(rename = "Well Diversified")]
    WellDiversified,
    #[serde(rename = "Needs More Diversification")]
    NeedsMore,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Performance {
    Positive,
    Negative,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Hold,
    #[serde(rename = "Consider Rebalancing")]
    ConsiderRebalancing,
    #[serde(rename = "Review Strategy")]
    ReviewStrategy,
}

/// Coarse labels derived from the weighted return and holding count
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioAnalysis {
    pub risk_level: RiskLevel,
    pub diversification: Diversification,
    pub performance: Performance,
    pub recommendation: Recommendation,
}

const HIGH_RETURN: Decimal = dec!(10);
const MODERATE_RETURN: Decimal = dec!(5);
const WELL_DIVERSIFIED_COUNT: usize = 5;

impl PortfolioAnalysis {
    pub fn from_metrics(metrics: &PortfolioMetrics) -> Self {
        let weighted = metrics.weighted_return;

        let (risk_level, recommendation) = if weighted > HIGH_RETURN {
            (RiskLevel::HighRiskHighReward, Recommendation::Hold)
        } else if weighted > MODERATE_RETURN {
            (RiskLevel::Moderate, Recommendation::ConsiderRebalancing)
        } else {
            (RiskLevel::Conservative, Recommendation::ReviewStrategy)
        };

        let diversification = if metrics.holding_count >= WELL_DIVERSIFIED_COUNT {
            Diversification::WellDiversified
        } else {
            Diversification::NeedsMore
        };

        let performance = if weighted > Decimal::ZERO {
            Performance::Positive
        } else {
            Performance::Negative
        };

        Self {
            risk_level,
            diversification,
            performance,
            recommendation,
        }
    }
}
