//! Domain validation errors.
//!
//! Returned when a value handed to a domain constructor or conversion falls
//! outside the range the betting math is defined for.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Probabilities must lie strictly between 0 and 1 to have American odds.
    #[error("probability must be strictly between 0 and 1, got {probability}")]
    ProbabilityOutOfRange {
        /// The rejected probability.
        probability: Decimal,
    },

    /// American odds strictly between -100 and +100 are not quoted.
    #[error("american odds must be <= -100 or >= 100, got {odds}")]
    InvalidAmericanOdds {
        /// The rejected odds value.
        odds: i64,
    },
}
