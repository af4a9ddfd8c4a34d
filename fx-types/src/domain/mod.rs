//! Domain models for the FX ledger.

pub mod currency;
pub mod rate;

pub use currency::{Currency, CurrencyId};
pub use rate::{NewRate, Rate, RateId};
