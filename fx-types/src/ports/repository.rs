//! Repository port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (Postgres, SQLite, in-memory mocks) implement this trait.

use chrono::NaiveDate;

use exchange_rates::CurrencyCode;

use crate::domain::{Currency, CurrencyId, NewRate, Rate, RateId};
use crate::error::RepoError;

/// Storage of currencies and their daily direct rates.
///
/// Unique violations (duplicate currency code, second rate for the same
/// base/target/date) surface as `RepoError::Conflict`.
#[async_trait::async_trait]
pub trait RatesRepository: Send + Sync + 'static {
    // ─────────────────────────────────────────────────────────────────────────────
    // Currency Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Registers a new currency code.
    async fn create_currency(&self, code: CurrencyCode) -> Result<Currency, RepoError>;

    /// Changes the code of an existing currency. `NotFound` if the id is unknown.
    async fn update_currency(
        &self,
        id: CurrencyId,
        code: CurrencyCode,
    ) -> Result<Currency, RepoError>;

    /// Removes a currency. `NotFound` if unknown, `Conflict` while rates reference it.
    async fn delete_currency(&self, code: CurrencyCode) -> Result<(), RepoError>;

    /// Resolves a code to its registered currency.
    async fn get_currency_by_code(&self, code: CurrencyCode)
    -> Result<Option<Currency>, RepoError>;

    /// Lists all registered currencies.
    async fn list_currencies(&self) -> Result<Vec<Currency>, RepoError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Rate Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Stores a new direct rate.
    async fn create_rate(&self, rate: NewRate) -> Result<Rate, RepoError>;

    /// Overwrites every field of an existing rate. `NotFound` if the id is unknown.
    async fn update_rate(&self, id: RateId, rate: NewRate) -> Result<Rate, RepoError>;

    /// Deletes a rate. `NotFound` if the id is unknown.
    async fn delete_rate(&self, id: RateId) -> Result<(), RepoError>;

    /// Gets a rate by ID.
    async fn get_rate(&self, id: RateId) -> Result<Option<Rate>, RepoError>;

    /// Lists rates, optionally filtered by base and/or target, oldest date first.
    async fn list_rates(
        &self,
        base: Option<CurrencyId>,
        target: Option<CurrencyId>,
    ) -> Result<Vec<Rate>, RepoError>;

    /// Lists every rate recorded for `date`, in insertion order.
    async fn list_rates_for_date(&self, date: NaiveDate) -> Result<Vec<Rate>, RepoError>;
}
