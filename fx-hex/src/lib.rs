//! # FX Hex
//!
//! Application service layer and HTTP adapter for the exchange rate service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (orchestrates domain operations)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi/` - OpenAPI document served through Swagger UI
//!
//! The service is generic over `R: RatesRepository`, allowing
//! different repository implementations to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::RatesService;
