//! Cross-Currency Rate Resolution
//!
//! Given every direct quote reported for one date, this crate finds the
//! effective rate between two currencies that may not be quoted against each
//! other, chaining through intermediate currencies where needed.
//!
//! The pipeline runs in three steps, each owned by one module:
//! - [`graph`] turns quotes into a directed multigraph with inverse edges
//! - [`search`] runs a multiplicative best-first search over that graph
//! - [`result`] packages the outcome as a [`CrossPairResult`]
//!
//! # Example
//! ```
//! use chrono::NaiveDate;
//! use exchange_rates::{resolve_rate, CurrencyCode, DirectQuote};
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let usd: CurrencyCode = "USD".parse().unwrap();
//! let eur: CurrencyCode = "EUR".parse().unwrap();
//! let gbp: CurrencyCode = "GBP".parse().unwrap();
//!
//! let quotes = vec![
//!     DirectQuote::new(usd, eur, 0.9, date).unwrap(),
//!     DirectQuote::new(eur, gbp, 0.8, date).unwrap(),
//! ];
//!
//! let result = resolve_rate(usd, gbp, &quotes);
//! assert!((result.rate.unwrap() - 0.72).abs() < 1e-12);
//! assert_eq!(result.cross_pairs.len(), 2);
//! ```
//!
//! Everything here is synchronous and allocation-local: a call builds its own
//! graph and search state and drops them on return, so concurrent callers
//! need no coordination.

pub mod code;
pub mod graph;
pub mod quote;
pub mod result;
pub mod search;

pub use code::{CodeError, CurrencyCode};
pub use graph::{Edge, RateGraph};
pub use quote::{DirectQuote, QuoteError};
pub use result::{CrossPair, CrossPairResult, resolve_rate};
pub use search::{PathOutcome, optimal_exchange};
