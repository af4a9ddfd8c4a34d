//! # FX Types
//!
//! Domain types and port traits for the currency and exchange rate service.
//! This crate has ZERO external IO dependencies - only data structures,
//! validation rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture
//! (the rate resolution engine itself lives in `exchange-rates`):
//! - `domain/` - Pure domain types (Currency, Rate, NewRate)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{Currency, CurrencyId, NewRate, Rate, RateId};
pub use dto::*;
pub use error::{AppError, DomainError, RepoError};
pub use exchange_rates::{CrossPair, CurrencyCode, DirectQuote};
pub use ports::RatesRepository;
