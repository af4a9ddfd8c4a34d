//! Exchange rate domain model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use exchange_rates::{CurrencyCode, DirectQuote};

use super::currency::Currency;
use crate::error::DomainError;

/// Unique identifier for a stored Rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct RateId(Uuid);

impl RateId {
    /// Creates a new random RateId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a RateId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for RateId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RateId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A stored exchange rate: `rate` units of target per unit of base on `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Rate {
    pub id: RateId,
    #[schema(example = 0.92)]
    pub rate: f64,
    pub currency_base: CurrencyCode,
    pub currency_target: CurrencyCode,
    #[schema(value_type = String, format = Date, example = "2024-01-15")]
    pub date: NaiveDate,
}

impl Rate {
    /// Converts the stored record into a quote the resolver accepts.
    pub fn to_quote(&self) -> Result<DirectQuote, DomainError> {
        DirectQuote::new(self.currency_base, self.currency_target, self.rate, self.date)
            .map_err(Into::into)
    }
}

/// A validated rate ready to be persisted.
///
/// Base and target are already resolved to registered currencies.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRate {
    pub base: Currency,
    pub target: Currency,
    pub rate: f64,
    pub date: NaiveDate,
}

impl NewRate {
    /// Creates a new rate.
    ///
    /// # Validation
    /// - Base and target must be different currencies
    /// - Rate must be positive and finite
    pub fn new(
        base: Currency,
        target: Currency,
        rate: f64,
        date: NaiveDate,
    ) -> Result<Self, DomainError> {
        DirectQuote::new(base.code, target.code, rate, date)?;
        Ok(Self {
            base,
            target,
            rate,
            date,
        })
    }

    /// Builds the stored representation once an id has been assigned.
    pub fn into_rate(self, id: RateId) -> Rate {
        Rate {
            id,
            rate: self.rate,
            currency_base: self.base.code,
            currency_target: self.target.code,
            date: self.date,
        }
    }
}
