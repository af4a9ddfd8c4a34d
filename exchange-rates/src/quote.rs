//! Directly reported exchange rates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::code::CurrencyCode;

/// Error type for rejected quotes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuoteError {
    #[error("Base and target currencies must be different, got {0} for both")]
    SameCurrency(CurrencyCode),

    #[error("Rate must be a positive finite number, got {0}")]
    InvalidRate(f64),
}

/// One reported rate: `rate` units of `target` per unit of `base` on `date`.
///
/// The date only tells callers which quotes belong together; resolution
/// itself never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectQuote {
    pub base: CurrencyCode,
    pub target: CurrencyCode,
    pub rate: f64,
    pub date: NaiveDate,
}

impl DirectQuote {
    /// Creates a quote, rejecting self-quotes and non-positive or non-finite rates.
    pub fn new(
        base: CurrencyCode,
        target: CurrencyCode,
        rate: f64,
        date: NaiveDate,
    ) -> Result<Self, QuoteError> {
        if base == target {
            return Err(QuoteError::SameCurrency(base));
        }
        if !rate.is_finite() || rate <= 0.0 {
            return Err(QuoteError::InvalidRate(rate));
        }
        Ok(Self {
            base,
            target,
            rate,
            date,
        })
    }
}
