//! Database row types and conversion helpers shared by the adapters.
//!
//! SQLite stores ids and dates as TEXT, PostgreSQL uses native UUID and DATE
//! columns, so each backend gets its own row structs.

use chrono::NaiveDate;
use sqlx::FromRow;

use fx_types::{Currency, CurrencyCode, CurrencyId, DomainError, Rate, RateId, RepoError};

// ─────────────────────────────────────────────────────────────────────────────
// Row structs: SQLite
// ─────────────────────────────────────────────────────────────────────────────

/// Currency row from SQLite.
#[cfg(feature = "sqlite")]
#[derive(FromRow)]
pub struct SqliteCurrencyRow {
    pub id: String,
    pub code: String,
}

/// Rate row from SQLite, joined with both currency codes.
#[cfg(feature = "sqlite")]
#[derive(FromRow)]
pub struct SqliteRateRow {
    pub id: String,
    pub currency_base: String,
    pub currency_target: String,
    pub rate: f64,
    pub date: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Row structs: PostgreSQL
// ─────────────────────────────────────────────────────────────────────────────

/// Currency row from PostgreSQL.
#[cfg(feature = "postgres")]
#[derive(FromRow)]
pub struct PgCurrencyRow {
    pub id: uuid::Uuid,
    pub code: String,
}

/// Rate row from PostgreSQL, joined with both currency codes.
#[cfg(feature = "postgres")]
#[derive(FromRow)]
pub struct PgRateRow {
    pub id: uuid::Uuid,
    pub currency_base: String,
    pub currency_target: String,
    pub rate: f64,
    pub date: NaiveDate,
}

/// Count row for reference checks.
#[derive(FromRow)]
pub struct DbCount {
    pub count: i64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing helpers
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "sqlite")]
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_code(s: &str) -> Result<CurrencyCode, RepoError> {
    s.parse()
        .map_err(|e| RepoError::Domain(DomainError::InvalidCurrencyCode(e)))
}

#[cfg(feature = "sqlite")]
pub fn parse_uuid(s: &str) -> Result<uuid::Uuid, RepoError> {
    uuid::Uuid::parse_str(s).map_err(|e| RepoError::Database(e.to_string()))
}

#[cfg(feature = "sqlite")]
pub fn parse_date(s: &str) -> Result<NaiveDate, RepoError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| RepoError::Database(e.to_string()))
}

#[cfg(feature = "sqlite")]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Maps a sqlx error, turning unique violations into `Conflict`.
pub fn db_error(err: sqlx::Error, conflict: impl FnOnce() -> String) -> RepoError {
    match err.as_database_error() {
        Some(db) if db.is_unique_violation() => RepoError::Conflict(conflict()),
        _ => RepoError::Database(err.to_string()),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Domain conversion
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "sqlite")]
impl SqliteCurrencyRow {
    pub fn into_domain(self) -> Result<Currency, RepoError> {
        let id = CurrencyId::from_uuid(parse_uuid(&self.id)?);
        Ok(Currency::from_parts(id, parse_code(&self.code)?))
    }
}

#[cfg(feature = "sqlite")]
impl SqliteRateRow {
    pub fn into_domain(self) -> Result<Rate, RepoError> {
        Ok(Rate {
            id: RateId::from_uuid(parse_uuid(&self.id)?),
            rate: self.rate,
            currency_base: parse_code(&self.currency_base)?,
            currency_target: parse_code(&self.currency_target)?,
            date: parse_date(&self.date)?,
        })
    }
}

#[cfg(feature = "postgres")]
impl PgCurrencyRow {
    pub fn into_domain(self) -> Result<Currency, RepoError> {
        Ok(Currency::from_parts(
            CurrencyId::from_uuid(self.id),
            parse_code(&self.code)?,
        ))
    }
}

#[cfg(feature = "postgres")]
impl PgRateRow {
    pub fn into_domain(self) -> Result<Rate, RepoError> {
        Ok(Rate {
            id: RateId::from_uuid(self.id),
            rate: self.rate,
            currency_base: parse_code(&self.currency_base)?,
            currency_target: parse_code(&self.currency_target)?,
            date: self.date,
        })
    }
}
