//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;

use fx_types::{
    AppError, CurrencyCode, CurrencyId, CurrencyRequest, RateId, RateRequest, RatesRepository,
};

use crate::RatesService;

/// Application state shared across handlers.
pub struct AppState<R: RatesRepository> {
    pub service: RatesService<R>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(AppError::BadRequest(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

fn parse_code(raw: &str) -> Result<CurrencyCode, ApiError> {
    raw.parse()
        .map_err(|e: exchange_rates::CodeError| AppError::BadRequest(e.to_string()).into())
}

fn parse_date(raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        AppError::BadRequest(format!("Invalid date {}, expected YYYY-MM-DD", raw)).into()
    })
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Currencies
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state, body))]
pub async fn create_currency<R: RatesRepository>(
    State(state): State<Arc<AppState<R>>>,
    body: Result<Json<CurrencyRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let currency = state.service.create_currency(req.code).await?;
    tracing::info!(code = %currency.code, "Currency registered");
    Ok((StatusCode::CREATED, Json(currency)))
}

/// List all currencies.
#[tracing::instrument(skip(state))]
pub async fn list_currencies<R: RatesRepository>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<impl IntoResponse, ApiError> {
    let currencies = state.service.list_currencies().await?;
    Ok(Json(currencies))
}

/// Rename a currency by ID.
#[tracing::instrument(skip(state, body), fields(currency_id = %id))]
pub async fn update_currency<R: RatesRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
    body: Result<Json<CurrencyRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let currency_id: CurrencyId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid currency ID".into()))?;
    let Json(req) = body?;

    let currency = state.service.update_currency(currency_id, req.code).await?;
    Ok((StatusCode::ACCEPTED, Json(currency)))
}

/// Delete a currency by code.
#[tracing::instrument(skip(state))]
pub async fn delete_currency<R: RatesRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let code = parse_code(&code)?;
    state.service.delete_currency(code).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ─────────────────────────────────────────────────────────────────────────────
// Rates
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state, body))]
pub async fn create_rate<R: RatesRepository>(
    State(state): State<Arc<AppState<R>>>,
    body: Result<Json<RateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let rate = state.service.create_rate(req).await?;
    Ok((StatusCode::CREATED, Json(rate)))
}

#[tracing::instrument(skip(state), fields(rate_id = %id))]
pub async fn get_rate<R: RatesRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let rate_id: RateId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid rate ID".into()))?;

    let rate = state.service.get_rate(rate_id).await?;
    Ok(Json(rate))
}

#[tracing::instrument(skip(state, body), fields(rate_id = %id))]
pub async fn update_rate<R: RatesRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
    body: Result<Json<RateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let rate_id: RateId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid rate ID".into()))?;
    let Json(req) = body?;

    let rate = state.service.update_rate(rate_id, req).await?;
    Ok((StatusCode::ACCEPTED, Json(rate)))
}

#[tracing::instrument(skip(state), fields(rate_id = %id))]
pub async fn delete_rate<R: RatesRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let rate_id: RateId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid rate ID".into()))?;

    state.service.delete_rate(rate_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Every stored rate for one ordered pair.
#[tracing::instrument(skip(state))]
pub async fn rate_history<R: RatesRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path((base, target)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let base = parse_code(&base)?;
    let target = parse_code(&target)?;

    let rates = state.service.rate_history(base, target).await?;
    Ok(Json(rates))
}

/// Effective rate for a pair on a date, direct or through cross pairs.
#[tracing::instrument(skip(state))]
pub async fn rate_for_date<R: RatesRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path((base, target, date)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let base = parse_code(&base)?;
    let target = parse_code(&target)?;
    let date = parse_date(&date)?;

    let response = state.service.rate_for_date(base, target, date).await?;
    Ok(Json(response))
}
