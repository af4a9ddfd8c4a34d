//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use exchange_rates::{CrossPair, CrossPairResult, CurrencyCode};

// ─────────────────────────────────────────────────────────────────────────────
// Currency DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to register or rename a currency.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrencyRequest {
    pub code: CurrencyCode,
}

// ─────────────────────────────────────────────────────────────────────────────
// Rate DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to record (or overwrite) a direct exchange rate.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RateRequest {
    /// Units of target currency per one unit of base currency
    #[schema(example = 0.92)]
    pub rate: f64,
    pub currency_base: CurrencyCode,
    pub currency_target: CurrencyCode,
    #[schema(value_type = String, format = Date, example = "2024-01-15")]
    pub date: NaiveDate,
}

/// Effective rate between two currencies on a date, with the hops used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RateCalcResponse {
    /// Composite rate, or null when no chain of quotes connects the pair
    #[schema(example = 0.72)]
    pub rate: Option<f64>,
    pub currency_base: CurrencyCode,
    pub currency_target: CurrencyCode,
    #[schema(value_type = String, format = Date, example = "2024-01-15")]
    pub date: NaiveDate,
    /// Hops as `[from, to]` pairs; tied chains appear back to back
    #[schema(value_type = Vec<Vec<String>>, example = json!([["USD", "EUR"], ["EUR", "GBP"]]))]
    pub cross_pairs: Vec<CrossPair>,
}

impl RateCalcResponse {
    /// Wraps a resolver result with the request it answers.
    pub fn from_result(
        currency_base: CurrencyCode,
        currency_target: CurrencyCode,
        date: NaiveDate,
        result: CrossPairResult,
    ) -> Self {
        Self {
            rate: result.rate,
            currency_base,
            currency_target,
            date,
            cross_pairs: result.cross_pairs,
        }
    }
}
