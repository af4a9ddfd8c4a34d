//! Error types for the FX ledger service.

use exchange_rates::{CodeError, CurrencyCode, QuoteError};

/// Domain-level errors (business rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error(transparent)]
    InvalidCurrencyCode(#[from] CodeError),

    #[error("Currencies must be different, got {0} for both")]
    SameCurrency(CurrencyCode),

    #[error("Rate must be a positive number, got {0}")]
    InvalidRate(f64),

    #[error("Currency {0} not found.")]
    CurrencyNotFound(CurrencyCode),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<QuoteError> for DomainError {
    fn from(err: QuoteError) -> Self {
        match err {
            QuoteError::SameCurrency(code) => DomainError::SameCurrency(code),
            QuoteError::InvalidRate(rate) => DomainError::InvalidRate(rate),
        }
    }
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::CurrencyNotFound(_) => AppError::NotFound(err.to_string()),
            e => AppError::BadRequest(e.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(e) => e.into(),
            RepoError::NotFound => AppError::NotFound("Resource not found".into()),
            RepoError::Database(e) => AppError::Internal(e),
            RepoError::Conflict(e) => AppError::Conflict(e),
        }
    }
}
