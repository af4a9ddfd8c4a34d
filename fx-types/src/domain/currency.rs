//! Currency domain model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use exchange_rates::CurrencyCode;

/// Unique identifier for a registered Currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct CurrencyId(Uuid);

impl CurrencyId {
    /// Creates a new random CurrencyId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a CurrencyId from an existing UUID.
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

impl Default for CurrencyId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CurrencyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CurrencyId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A registered currency. The code is unique across the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Currency {
    pub id: CurrencyId,
    pub code: CurrencyCode,
}

impl Currency {
    /// Creates a currency with a fresh identifier.
    pub fn new(code: CurrencyCode) -> Self {
        Self {
            id: CurrencyId::new(),
            code,
        }
    }

    /// Creates a currency with all fields specified (for database reconstruction).
    pub fn from_parts(id: CurrencyId, code: CurrencyCode) -> Self {
        Self { id, code }
    }
}
