//! Advice Generator
//!
//! Turns holdings into "past self" reflections and allocations into
//! anti-advice warnings. Every function here is total: any input produces
//! text, never an error.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::model::{Allocation, EnrichedHolding, PortfolioMetrics};

/// Tickers counted toward the tech-sector concentration rule
pub const TECH_TICKERS: &[&str] = &[
    "TCS", "INFY", "WIPRO", "HCLTECH", "TESLA", "AAPL", "GOOGL", "MSFT",
];

/// Warnings appended to every oracle response
pub const GENERAL_WARNINGS: [&str; 3] = [
    "💡 Don't panic sell during market dips.",
    "🚫 Don't chase hot stocks without research.",
    "⏰ Don't check your portfolio every day - it leads to emotional decisions.",
];

const OVER_CONCENTRATION_LIMIT: Decimal = dec!(40);
const RISKY_POSITION_LIMIT: Decimal = dec!(30);
const MIN_HOLDINGS: usize = 3;
const MAX_TECH_HOLDINGS: usize = 2;
const CONSERVATIVE_TOTAL: Decimal = dec!(25);

/// How the past self feels about a holding
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Excited,
    Satisfied,
    Cautious,
    Concerned,
}

impl Sentiment {
    /// Classify a trailing return, first match from the top
    pub fn classify(percent_return: Decimal) -> Self {
        if percent_return > dec!(15) {
            Self::Excited
        } else if percent_return > dec!(5) {
            Self::Satisfied
        } else if percent_return > Decimal::ZERO {
            Self::Cautious
        } else {
            Self::Concerned
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excited => "excited",
            Self::Satisfied => "satisfied",
            Self::Cautious => "cautious",
            Self::Concerned => "concerned",
        }
    }

    pub const fn advice(self) -> &'static str {
        match self {
            Self::Excited => "Excellent choice!",
            Self::Satisfied => "Good pick, but could be better.",
            Self::Cautious => "Decent, but consider alternatives.",
            Self::Concerned => "Maybe reconsider this allocation.",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plain decimal rendering without trailing zeros ("12", "3.5")
pub fn format_number(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Return as a signed percentage: "+12%", "-5%", "0%"
pub fn format_change(percent_return: Decimal) -> String {
    let sign = if percent_return > Decimal::ZERO { "+" } else { "" };
    format!("{sign}{}%", format_number(percent_return))
}

/// Render a single reflection line
pub fn reflection(holding: &EnrichedHolding) -> String {
    let sentiment = Sentiment::classify(holding.percent_return);
    format!(
        "Your past self would be {sentiment}: \"If you held {} at {}%, you would have seen a {} return over the past year. Current price: ${}. {}\"",
        holding.ticker,
        format_number(holding.percentage),
        format_change(holding.percent_return),
        format_number(holding.price),
        sentiment.advice(),
    )
}

/// One reflection per holding, in input order
pub fn generate_reflections(holdings: &[EnrichedHolding]) -> Vec<String> {
    holdings.iter().map(reflection).collect()
}

/// One-line summary of the aggregate metrics
pub fn portfolio_summary(metrics: &PortfolioMetrics) -> String {
    let sign = if metrics.weighted_return > Decimal::ZERO { "+" } else { "" };
    format!(
        "Portfolio Summary: {} stocks, {}% allocated, {sign}{}% weighted return. Best performer: {} ({}), Worst: {} ({}).",
        metrics.holding_count,
        format_number(metrics.total_allocation),
        format_number(metrics.weighted_return),
        metrics.best_performer.ticker,
        format_change(metrics.best_performer.percent_return),
        metrics.worst_performer.ticker,
        format_change(metrics.worst_performer.percent_return),
    )
}

/// Rule-based warnings over raw allocations.
///
/// The >40% and >30% rules are evaluated independently, so a heavy position
/// is flagged at both severities.
pub fn generate_warnings(portfolio: &[Allocation]) -> Vec<String> {
    let mut warnings = Vec::new();

    for allocation in portfolio {
        if allocation.percentage > OVER_CONCENTRATION_LIMIT {
            warnings.push(format!(
                "🚨 Do NOT put more than 40% in {}. You're over-concentrating risk!",
                allocation.ticker
            ));
        }
        if allocation.percentage > RISKY_POSITION_LIMIT {
            warnings.push(format!(
                "⚠️ {} at {}% is risky. Consider diversifying.",
                allocation.ticker,
                format_number(allocation.percentage)
            ));
        }
    }

    if portfolio.len() < MIN_HOLDINGS {
        warnings.push(format!(
            "❌ Don't put all eggs in {} basket(s). Diversify across at least 5-7 stocks.",
            portfolio.len()
        ));
    }

    let tech_count = portfolio
        .iter()
        .filter(|a| TECH_TICKERS.contains(&a.ticker.as_str()))
        .count();
    if tech_count > MAX_TECH_HOLDINGS {
        warnings.push(format!(
            "🔴 Don't over-concentrate in tech. You have {tech_count} tech stocks - diversify sectors!"
        ));
    }

    let total = portfolio
        .iter()
        .fold(Decimal::ZERO, |sum, a| sum.saturating_add(a.percentage));
    if total < CONSERVATIVE_TOTAL {
        warnings.push(format!(
            "📉 Don't be too conservative. {}% total allocation might miss growth opportunities.",
            format_number(total)
        ));
    }

    warnings.extend(GENERAL_WARNINGS.iter().map(ToString::to_string));
    warnings
}
