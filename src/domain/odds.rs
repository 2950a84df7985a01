//! American odds arithmetic.
//!
//! - [`implied_probability`] - break-even probability encoded by a price
//! - [`win_probability_pct`] - the same, as a percentage with two decimals
//! - [`probability_to_american`] - the inverse conversion
//! - [`round_average`] - integer average of raw prices
//!
//! No vig is removed anywhere: the implied probability of a single side is
//! reported as-is.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::error::DomainError;

/// An American odds price, always a whole number once averaged.
pub type AmericanOdds = i64;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Convert American odds to an implied probability in `[0, 1]`.
///
/// Negative odds: `-o / (-o + 100)`. Non-negative odds: `100 / (o + 100)`.
#[must_use]
pub fn implied_probability(odds: AmericanOdds) -> Decimal {
    let odds = Decimal::from(odds);
    if odds < Decimal::ZERO {
        let stake = -odds;
        stake / (stake + HUNDRED)
    } else {
        HUNDRED / (odds + HUNDRED)
    }
}

/// Implied probability as a percentage rounded to two decimal places.
#[must_use]
pub fn win_probability_pct(odds: AmericanOdds) -> Decimal {
    (implied_probability(odds) * HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert a probability in `(0, 1)` back to rounded American odds.
///
/// # Errors
///
/// Returns [`DomainError::ProbabilityOutOfRange`] for probabilities outside
/// the open unit interval, or too close to its ends to quote.
pub fn probability_to_american(probability: Decimal) -> Result<AmericanOdds, DomainError> {
    if probability <= Decimal::ZERO || probability >= Decimal::ONE {
        return Err(DomainError::ProbabilityOutOfRange { probability });
    }

    let complement = Decimal::ONE - probability;
    let odds = if probability >= Decimal::new(5, 1) {
        (HUNDRED * probability).checked_div(complement).map(|o| -o)
    } else {
        (HUNDRED * complement).checked_div(probability)
    };

    odds.and_then(round_to_odds)
        .ok_or(DomainError::ProbabilityOutOfRange { probability })
}

/// Difference between the market's and the expected implied probability, in
/// percentage points. Positive means the market prices the side as likelier.
#[must_use]
pub fn edge_points(expected: AmericanOdds, market: AmericanOdds) -> Decimal {
    ((implied_probability(market) - implied_probability(expected)) * HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Reject values that are not quotable American odds.
///
/// # Errors
///
/// Returns [`DomainError::InvalidAmericanOdds`] for values in `(-100, 100)`.
pub fn validate_american(odds: AmericanOdds) -> Result<AmericanOdds, DomainError> {
    if odds > -100 && odds < 100 {
        return Err(DomainError::InvalidAmericanOdds { odds });
    }
    Ok(odds)
}

/// Mean of `prices`, rounded to the nearest integer with ties away from zero.
///
/// Returns `None` for an empty slice, or when the sum or the mean does not
/// fit the odds range.
#[must_use]
pub fn round_average(prices: &[Decimal]) -> Option<AmericanOdds> {
    if prices.is_empty() {
        return None;
    }
    let sum = prices
        .iter()
        .try_fold(Decimal::ZERO, |acc, price| acc.checked_add(*price))?;
    round_to_odds(sum / Decimal::from(prices.len()))
}

fn round_to_odds(value: Decimal) -> Option<AmericanOdds> {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}
