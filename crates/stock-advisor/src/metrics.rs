//! Metrics Engine
//!
//! Aggregates enriched holdings into [`PortfolioMetrics`]. Pure and
//! deterministic: no I/O, no shared state.
//!
//! The weighted return is a weighted *contribution*, `Σ return × pct / 100`,
//! and is not divided by the total allocation. A portfolio that is only 50%
//! allocated reports half the return of the same picks at 100%.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::{AdvisorError, Result};
use crate::model::{EnrichedHolding, PortfolioMetrics};

/// Round to one decimal place, midpoint away from zero
pub fn round_one(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

fn overflow(what: &str) -> AdvisorError {
    AdvisorError::InvalidInput(format!("Percentages too large to compute the {what}"))
}

/// Compute aggregate statistics for a non-empty set of holdings
pub fn compute_metrics(holdings: &[EnrichedHolding]) -> Result<PortfolioMetrics> {
    let (first, rest) = holdings.split_first().ok_or(AdvisorError::EmptyPortfolio)?;

    let mut total_allocation = Decimal::ZERO;
    let mut weighted = Decimal::ZERO;
    let mut return_sum = Decimal::ZERO;
    let mut best = first;
    let mut worst = first;

    for holding in holdings {
        total_allocation = total_allocation
            .checked_add(holding.percentage)
            .ok_or_else(|| overflow("total allocation"))?;
        weighted = (holding.percent_return / dec!(100))
            .checked_mul(holding.percentage)
            .and_then(|contribution| weighted.checked_add(contribution))
            .ok_or_else(|| overflow("weighted return"))?;
        return_sum = return_sum
            .checked_add(holding.percent_return)
            .ok_or_else(|| overflow("average return"))?;
    }

    // Strict comparisons: the earliest holding wins a tie
    for holding in rest {
        if holding.percent_return > best.percent_return {
            best = holding;
        }
        if holding.percent_return < worst.percent_return {
            worst = holding;
        }
    }

    let holding_count = holdings.len();
    let average_return = return_sum / Decimal::from(holding_count);

    Ok(PortfolioMetrics {
        total_allocation,
        weighted_return: round_one(weighted),
        best_performer: best.clone(),
        worst_performer: worst.clone(),
        holding_count,
        average_return: round_one(average_return),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuoteSource;

    fn holding(ticker: &str, percentage: Decimal, percent_return: Decimal) -> EnrichedHolding {
        EnrichedHolding {
            ticker: ticker.into(),
            percentage,
            price: dec!(100),
            percent_return,
            source: QuoteSource::Live,
        }
    }

    #[test]
    fn test_two_holding_example() {
        let holdings = vec![
            holding("TCS", dec!(50), dec!(12)),
            holding("INFY", dec!(50), dec!(-5)),
        ];
        let metrics = compute_metrics(&holdings).unwrap();

        assert_eq!(metrics.weighted_return, dec!(3.5));
        assert_eq!(metrics.total_allocation, dec!(100));
        assert_eq!(metrics.best_performer.ticker, "TCS");
        assert_eq!(metrics.worst_performer.ticker, "INFY");
        assert_eq!(metrics.average_return, dec!(3.5));
        assert_eq!(metrics.holding_count, 2);
    }

    #[test]
    fn test_empty_portfolio_is_an_error() {
        assert!(matches!(compute_metrics(&[]), Err(AdvisorError::EmptyPortfolio)));
    }

    #[test]
    fn test_weighted_return_is_not_renormalized() {
        // Only 50% allocated: contribution halves instead of averaging back to 10
        let holdings = vec![holding("HDFC", dec!(50), dec!(10))];
        let metrics = compute_metrics(&holdings).unwrap();
        assert_eq!(metrics.total_allocation, dec!(50));
        assert_eq!(metrics.weighted_return, dec!(5));
    }

    #[test]
    fn test_allocation_over_100_is_reported_not_rejected() {
        let holdings = vec![
            holding("TCS", dec!(80), dec!(12)),
            holding("ITC", dec!(70), dec!(4)),
        ];
        let metrics = compute_metrics(&holdings).unwrap();
        assert_eq!(metrics.total_allocation, dec!(150));
        // 9.6 + 2.8
        assert_eq!(metrics.weighted_return, dec!(12.4));
    }

    #[test]
    fn test_ties_keep_first_occurrence() {
        let holdings = vec![
            holding("A", dec!(10), dec!(7)),
            holding("B", dec!(10), dec!(7)),
            holding("C", dec!(10), dec!(7)),
        ];
        let metrics = compute_metrics(&holdings).unwrap();
        assert_eq!(metrics.best_performer.ticker, "A");
        assert_eq!(metrics.worst_performer.ticker, "A");

        let holdings = vec![
            holding("LOW1", dec!(10), dec!(-3)),
            holding("HIGH1", dec!(10), dec!(9)),
            holding("HIGH2", dec!(10), dec!(9)),
            holding("LOW2", dec!(10), dec!(-3)),
        ];
        let metrics = compute_metrics(&holdings).unwrap();
        assert_eq!(metrics.best_performer.ticker, "HIGH1");
        assert_eq!(metrics.worst_performer.ticker, "LOW1");
    }

    #[test]
    fn test_sums_are_permutation_invariant() {
        let holdings = vec![
            holding("TCS", dec!(25), dec!(12)),
            holding("INFY", dec!(15), dec!(-5)),
            holding("TITAN", dec!(35), dec!(16)),
            holding("ITC", dec!(25), dec!(4)),
        ];
        let mut reversed = holdings.clone();
        reversed.reverse();
        let mut rotated = holdings.clone();
        rotated.rotate_left(1);

        let base = compute_metrics(&holdings).unwrap();
        for permutation in [reversed, rotated] {
            let metrics = compute_metrics(&permutation).unwrap();
            assert_eq!(metrics.total_allocation, base.total_allocation);
            assert_eq!(metrics.weighted_return, base.weighted_return);
            assert_eq!(metrics.average_return, base.average_return);
            assert_eq!(metrics.holding_count, holdings.len());
        }
    }

    #[test]
    fn test_huge_percentages_are_rejected_not_panicking() {
        let holdings = vec![
            holding("TCS", dec!(50000000000000000000000000000), dec!(12)),
            holding("INFY", dec!(50000000000000000000000000000), dec!(12)),
        ];
        let err = compute_metrics(&holdings).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.user_message().contains("too large"));
    }

    #[test]
    fn test_rounding_is_half_away_from_zero() {
        assert_eq!(round_one(dec!(2.25)), dec!(2.3));
        assert_eq!(round_one(dec!(-2.25)), dec!(-2.3));
        assert_eq!(round_one(dec!(2.24)), dec!(2.2));
    }

    #[test]
    fn test_average_return_rounds() {
        let holdings = vec![
            holding("A", dec!(10), dec!(1)),
            holding("B", dec!(10), dec!(1)),
            holding("C", dec!(10), dec!(2)),
        ];
        // 4 / 3 = 1.333...
        let metrics = compute_metrics(&holdings).unwrap();
        assert_eq!(metrics.average_return, dec!(1.3));
    }
}
