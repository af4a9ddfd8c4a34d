//! # FX Client SDK
//!
//! A typed Rust client for the FX rates API.

use chrono::NaiveDate;
use fx_types::{
    Currency, CurrencyCode, CurrencyId, CurrencyRequest, Rate, RateCalcResponse, RateId,
    RateRequest,
};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// FX rates API client.
#[derive(Clone)]
pub struct FxClient {
    base_url: String,
    http: Client,
}

impl FxClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Currencies
    // ─────────────────────────────────────────────────────────────────────────────

    /// Registers a currency.
    pub async fn create_currency(&self, code: CurrencyCode) -> Result<Currency, ClientError> {
        self.send(self.http.post(self.url("/api/currencies")).json(&CurrencyRequest { code }))
            .await
    }

    /// Lists registered currencies.
    pub async fn list_currencies(&self) -> Result<Vec<Currency>, ClientError> {
        self.send(self.http.get(self.url("/api/currencies"))).await
    }

    /// Changes the code of the currency with the given id.
    pub async fn update_currency(
        &self,
        id: CurrencyId,
        code: CurrencyCode,
    ) -> Result<Currency, ClientError> {
        let path = format!("/api/currencies/{}", id);
        self.send(self.http.put(self.url(&path)).json(&CurrencyRequest { code }))
            .await
    }

    /// Deletes a currency by code.
    pub async fn delete_currency(&self, code: CurrencyCode) -> Result<(), ClientError> {
        let path = format!("/api/currencies/{}", code);
        self.send_empty(self.http.delete(self.url(&path))).await
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Rates
    // ─────────────────────────────────────────────────────────────────────────────

    /// Records a direct rate.
    pub async fn create_rate(&self, req: &RateRequest) -> Result<Rate, ClientError> {
        self.send(self.http.post(self.url("/api/rates")).json(req))
            .await
    }

    /// Fetches a stored rate.
    pub async fn get_rate(&self, id: RateId) -> Result<Rate, ClientError> {
        let path = format!("/api/rates/{}", id);
        self.send(self.http.get(self.url(&path))).await
    }

    /// Overwrites a stored rate.
    pub async fn update_rate(&self, id: RateId, req: &RateRequest) -> Result<Rate, ClientError> {
        let path = format!("/api/rates/{}", id);
        self.send(self.http.put(self.url(&path)).json(req)).await
    }

    /// Deletes a stored rate.
    pub async fn delete_rate(&self, id: RateId) -> Result<(), ClientError> {
        let path = format!("/api/rates/{}", id);
        self.send_empty(self.http.delete(self.url(&path))).await
    }

    /// Lists stored rates for one ordered pair, oldest first.
    pub async fn rate_history(
        &self,
        base: CurrencyCode,
        target: CurrencyCode,
    ) -> Result<Vec<Rate>, ClientError> {
        let path = format!("/api/rates/history/{}/{}", base, target);
        self.send(self.http.get(self.url(&path))).await
    }

    /// Resolves the effective rate for a pair on a date.
    pub async fn rate_for_date(
        &self,
        base: CurrencyCode,
        target: CurrencyCode,
        date: NaiveDate,
    ) -> Result<RateCalcResponse, ClientError> {
        let path = format!(
            "/api/rates/rate/{}/{}/{}",
            base,
            target,
            date.format("%Y-%m-%d")
        );
        self.send(self.http.get(self.url(&path))).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let resp = check_status(req.send().await?).await?;
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn send_empty(&self, req: RequestBuilder) -> Result<(), ClientError> {
        check_status(req.send().await?).await?;
        Ok(())
    }
}

/// Turns non-2xx responses into `ClientError::Api`, preferring the server's
/// `error` field as the message.
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or(body);
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
