//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use fx_types::domain::{Currency, CurrencyId, Rate, RateId};
use fx_types::dto::{CurrencyRequest, RateCalcResponse, RateRequest};
use fx_types::CurrencyCode;
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Register a currency
#[utoipa::path(
    post,
    path = "/api/currencies",
    tag = "currencies",
    request_body = CurrencyRequest,
    responses(
        (status = 201, description = "Currency registered", body = Currency),
        (status = 400, description = "Malformed currency code"),
        (status = 409, description = "Currency already registered")
    )
)]
async fn create_currency() {}

/// List registered currencies
#[utoipa::path(
    get,
    path = "/api/currencies",
    tag = "currencies",
    responses(
        (status = 200, description = "Registered currencies ordered by code", body = Vec<Currency>)
    )
)]
async fn list_currencies() {}

/// Change the code of a currency
#[utoipa::path(
    put,
    path = "/api/currencies/{key}",
    tag = "currencies",
    params(
        ("key" = String, Path, description = "Currency ID (UUID)")
    ),
    request_body = CurrencyRequest,
    responses(
        (status = 202, description = "Currency updated", body = Currency),
        (status = 404, description = "Currency not found"),
        (status = 409, description = "Code already taken")
    )
)]
async fn update_currency() {}

/// Remove a currency no rate refers to
#[utoipa::path(
    delete,
    path = "/api/currencies/{key}",
    tag = "currencies",
    params(
        ("key" = String, Path, description = "Three-letter currency code", example = "USD")
    ),
    responses(
        (status = 204, description = "Currency deleted"),
        (status = 404, description = "Currency not found"),
        (status = 409, description = "Currency is referenced by rates")
    )
)]
async fn delete_currency() {}

/// Record a direct rate
#[utoipa::path(
    post,
    path = "/api/rates",
    tag = "rates",
    request_body = RateRequest,
    responses(
        (status = 201, description = "Rate stored", body = Rate),
        (status = 400, description = "Same currency on both sides or non-positive rate"),
        (status = 404, description = "Currency not found"),
        (status = 409, description = "A rate for this pair and date already exists")
    )
)]
async fn create_rate() {}

/// Fetch a stored rate
#[utoipa::path(
    get,
    path = "/api/rates/{id}",
    tag = "rates",
    params(
        ("id" = String, Path, description = "Rate ID (UUID)")
    ),
    responses(
        (status = 200, description = "Stored rate", body = Rate),
        (status = 400, description = "Malformed rate ID"),
        (status = 404, description = "Rate not found")
    )
)]
async fn get_rate() {}

/// Overwrite a stored rate
#[utoipa::path(
    put,
    path = "/api/rates/{id}",
    tag = "rates",
    params(
        ("id" = String, Path, description = "Rate ID (UUID)")
    ),
    request_body = RateRequest,
    responses(
        (status = 202, description = "Rate updated", body = Rate),
        (status = 400, description = "Invalid rate"),
        (status = 404, description = "Rate or currency not found")
    )
)]
async fn update_rate() {}

/// Delete a stored rate
#[utoipa::path(
    delete,
    path = "/api/rates/{id}",
    tag = "rates",
    params(
        ("id" = String, Path, description = "Rate ID (UUID)")
    ),
    responses(
        (status = 204, description = "Rate deleted"),
        (status = 404, description = "Rate not found")
    )
)]
async fn delete_rate() {}

/// History of direct rates for a pair
#[utoipa::path(
    get,
    path = "/api/rates/history/{base}/{target}",
    tag = "rates",
    params(
        ("base" = String, Path, description = "Base currency code", example = "USD"),
        ("target" = String, Path, description = "Target currency code", example = "EUR")
    ),
    responses(
        (status = 200, description = "Rates ordered by date", body = Vec<Rate>),
        (status = 404, description = "Currency not found")
    )
)]
async fn rate_history() {}

/// Effective rate on a date, possibly through cross pairs
#[utoipa::path(
    get,
    path = "/api/rates/rate/{base}/{target}/{date}",
    tag = "rates",
    params(
        ("base" = String, Path, description = "Base currency code", example = "USD"),
        ("target" = String, Path, description = "Target currency code", example = "GBP"),
        ("date" = String, Path, description = "Date as YYYY-MM-DD", example = "2024-01-15")
    ),
    responses(
        (status = 200, description = "Resolved rate; `rate` is null when no chain connects the pair", body = RateCalcResponse),
        (status = 400, description = "Malformed code or date, or identical currencies"),
        (status = 404, description = "No rates recorded for the date")
    )
)]
async fn rate_for_date() {}

/// OpenAPI documentation for the FX rates API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "FX Rates Service API",
        version = "1.0.0",
        description = "Daily exchange rates between registered currencies.\n\nRates that are not quoted directly are derived by chaining the quotes recorded for the same day; the hops used are returned as `cross_pairs`.",
        license(name = "MIT"),
    ),
    paths(
        health,
        create_currency,
        list_currencies,
        update_currency,
        delete_currency,
        create_rate,
        get_rate,
        update_rate,
        delete_rate,
        rate_history,
        rate_for_date,
    ),
    components(
        schemas(
            Currency,
            CurrencyId,
            CurrencyCode,
            CurrencyRequest,
            Rate,
            RateId,
            RateRequest,
            RateCalcResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "currencies", description = "Currency registry"),
        (name = "rates", description = "Direct rates and cross-rate lookups"),
    )
)]
pub struct ApiDoc;
