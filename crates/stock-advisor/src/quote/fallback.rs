//! Fallback Quotes
//!
//! Hand-picked representative prices and returns used whenever the live
//! provider cannot answer. Unknown tickers borrow the reference ticker's row.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::metrics::round_one;
use crate::model::{Quote, QuoteSource};

/// Ticker whose row stands in for unknown tickers
pub const REFERENCE_TICKER: &str = "TCS";

/// Largest jitter applied to a fallback return, in percentage points
const RETURN_JITTER_TENTHS: i64 = 50;

/// Largest jitter applied to a fallback price
const PRICE_JITTER: i64 = 50;

/// Substitute quote table with optional seeded jitter
pub struct FallbackQuotes {
    /// Seeded RNG; `None` keeps fallback values fixed
    rng: Option<Mutex<StdRng>>,
    seed: Option<u64>,
}

impl Default for FallbackQuotes {
    fn default() -> Self {
        Self::deterministic()
    }
}

impl FallbackQuotes {
    /// Table values exactly as listed
    pub const fn deterministic() -> Self {
        Self { rng: None, seed: None }
    }

    /// Table values shifted by up to ±5 return points and ±50 in price,
    /// drawn from an RNG seeded with `seed`
    pub fn jittered(seed: u64) -> Self {
        Self {
            rng: Some(Mutex::new(StdRng::seed_from_u64(seed))),
            seed: Some(seed),
        }
    }

    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Whether the ticker has its own row in the table
    pub fn is_known(ticker: &str) -> bool {
        base_row(&ticker.trim().to_uppercase()).is_some()
    }

    /// Fallback quote for any ticker, labeled [`QuoteSource::Fallback`]
    pub fn quote(&self, ticker: &str) -> Quote {
        let symbol = ticker.trim().to_uppercase();
        let (price, percent_return) = base_row(&symbol)
            .or_else(|| base_row(REFERENCE_TICKER))
            .unwrap_or((dec!(3500), dec!(12)));

        let (price, percent_return) = match &self.rng {
            Some(rng) => {
                let mut rng = rng.lock().unwrap_or_else(PoisonError::into_inner);
                let return_shift =
                    Decimal::new(rng.gen_range(-RETURN_JITTER_TENTHS..=RETURN_JITTER_TENTHS), 1);
                let price_shift = Decimal::from(rng.gen_range(-PRICE_JITTER..=PRICE_JITTER));
                (price + price_shift, round_one(percent_return + return_shift))
            }
            None => (price, percent_return),
        };

        Quote::new(symbol, price, percent_return, QuoteSource::Fallback)
    }
}

/// (price, one-year return %) per known ticker
fn base_row(ticker: &str) -> Option<(Decimal, Decimal)> {
    let row = match ticker {
        "TCS" => (dec!(3500), dec!(12)),
        "INFY" => (dec!(1500), dec!(-5)),
        "RELIANCE" => (dec!(2500), dec!(8)),
        "HDFC" => (dec!(2800), dec!(15)),
        "ICICIBANK" => (dec!(900), dec!(6)),
        "SBIN" => (dec!(550), dec!(-2)),
        "WIPRO" => (dec!(450), dec!(3)),
        "BHARTIARTL" => (dec!(1200), dec!(18)),
        "ITC" => (dec!(400), dec!(4)),
        "LT" => (dec!(3200), dec!(9)),
        "ASIANPAINT" => (dec!(3200), dec!(7)),
        "MARUTI" => (dec!(9500), dec!(-1)),
        "NESTLEIND" => (dec!(18000), dec!(5)),
        "BAJFINANCE" => (dec!(6500), dec!(22)),
        "HINDUNILVR" => (dec!(2500), dec!(2)),
        "KOTAKBANK" => (dec!(1800), dec!(11)),
        "AXISBANK" => (dec!(1100), dec!(13)),
        "TITAN" => (dec!(3200), dec!(16)),
        "ULTRACEMCO" => (dec!(7500), dec!(-3)),
        "POWERGRID" => (dec!(250), dec!(1)),
        "TESLA" | "TSLA" => (dec!(250), dec!(15)),
        "AAPL" => (dec!(180), dec!(8)),
        "GOOGL" => (dec!(140), dec!(12)),
        "MSFT" => (dec!(350), dec!(10)),
        "AMZN" => (dec!(150), dec!(6)),
        "META" => (dec!(300), dec!(20)),
        _ => return None,
    };
    Some(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_ticker_uses_its_row() {
        let quote = FallbackQuotes::deterministic().quote("infy");
        assert_eq!(quote.ticker, "INFY");
        assert_eq!(quote.price, dec!(1500));
        assert_eq!(quote.percent_return, dec!(-5));
        assert_eq!(quote.source, QuoteSource::Fallback);
    }

    #[test]
    fn test_unknown_ticker_borrows_reference_row() {
        let quote = FallbackQuotes::deterministic().quote("ZZZZ");
        assert_eq!(quote.ticker, "ZZZZ");
        assert_eq!(quote.price, dec!(3500));
        assert_eq!(quote.percent_return, dec!(12));
        assert!(!FallbackQuotes::is_known("ZZZZ"));
        assert!(FallbackQuotes::is_known("msft"));
    }

    #[test]
    fn test_same_seed_same_values() {
        let a = FallbackQuotes::jittered(42);
        let b = FallbackQuotes::jittered(42);
        for ticker in ["TCS", "INFY", "NOPE"] {
            let qa = a.quote(ticker);
            let qb = b.quote(ticker);
            assert_eq!(qa.price, qb.price);
            assert_eq!(qa.percent_return, qb.percent_return);
        }
        assert_eq!(a.seed(), Some(42));
    }

    #[test]
    fn test_jitter_stays_in_bounds() {
        let fallback = FallbackQuotes::jittered(7);
        for _ in 0..200 {
            let quote = fallback.quote("POWERGRID");
            assert!(quote.percent_return >= dec!(-4) && quote.percent_return <= dec!(6));
            assert!(quote.price >= dec!(200) && quote.price <= dec!(300));
            assert_eq!(quote.percent_return, round_one(quote.percent_return));
        }
    }
}
