//! End-to-end tests of the HTTP API over an in-memory SQLite repository.

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use fx_hex::{RatesService, inbound::HttpServer};
use fx_repo::SqliteRepo;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app() -> Router {
    let repo = SqliteRepo::new("sqlite::memory:").await.unwrap();
    HttpServer::new(RatesService::new(repo)).router()
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn seed(app: &Router, codes: &[&str], rates: &[(&str, &str, f64, &str)]) {
    for code in codes {
        let (status, _) = send(app, Method::POST, "/api/currencies", Some(json!({ "code": code }))).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    for (base, target, rate, date) in rates {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/rates",
            Some(json!({
                "rate": rate,
                "currency_base": base,
                "currency_target": target,
                "date": date,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
    }
}

#[tokio::test]
async fn test_health() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_currency_lifecycle() {
    let app = app().await;

    let (status, created) =
        send(&app, Method::POST, "/api/currencies", Some(json!({ "code": "usd" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["code"], "USD");

    let (status, body) =
        send(&app, Method::POST, "/api/currencies", Some(json!({ "code": "USD" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 409);
    assert_eq!(body["error"], "Currency already registered");

    let id = created["id"].as_str().unwrap();
    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/currencies/{id}"),
        Some(json!({ "code": "USN" })),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(updated["code"], "USN");

    let (status, list) = send(&app, Method::GET, "/api/currencies", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, Method::DELETE, "/api/currencies/USN", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::DELETE, "/api/currencies/USN", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Currency USN not found.");
}

#[tokio::test]
async fn test_invalid_currency_code_is_bad_request() {
    let app = app().await;

    let (status, body) =
        send(&app, Method::POST, "/api/currencies", Some(json!({ "code": "DOLLAR" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);

    let (status, _) = send(&app, Method::DELETE, "/api/currencies/U1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/currencies/not-a-uuid",
        Some(json!({ "code": "USD" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_referenced_currency_conflicts() {
    let app = app().await;
    seed(&app, &["USD", "EUR"], &[("USD", "EUR", 0.9, "2024-01-15")]).await;

    let (status, _) = send(&app, Method::DELETE, "/api/currencies/EUR", None).await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_rate_validation() {
    let app = app().await;
    seed(&app, &["USD", "EUR"], &[]).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/rates",
        Some(json!({ "rate": 1.1, "currency_base": "USD", "currency_target": "GBP", "date": "2024-01-15" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Currency GBP not found.");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/rates",
        Some(json!({ "rate": -1.0, "currency_base": "USD", "currency_target": "EUR", "date": "2024-01-15" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/rates",
        Some(json!({ "rate": 1.0, "currency_base": "EUR", "currency_target": "EUR", "date": "2024-01-15" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rate_update_delete_and_history() {
    let app = app().await;
    seed(
        &app,
        &["USD", "EUR"],
        &[("USD", "EUR", 0.93, "2024-01-16"), ("USD", "EUR", 0.92, "2024-01-15")],
    )
    .await;

    let (status, history) = send(&app, Method::GET, "/api/rates/history/USD/EUR", None).await;
    assert_eq!(status, StatusCode::OK);
    let history = history.as_array().unwrap().clone();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["date"], "2024-01-15");
    assert_eq!(history[1]["date"], "2024-01-16");

    let id = history[0]["id"].as_str().unwrap();
    let (status, fetched) = send(&app, Method::GET, &format!("/api/rates/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["rate"], 0.92);
    assert_eq!(fetched["currency_base"], "USD");

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/rates/{id}"),
        Some(json!({ "rate": 0.91, "currency_base": "USD", "currency_target": "EUR", "date": "2024-01-14" })),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(updated["rate"], 0.91);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/rates/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/rates/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, &format!("/api/rates/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/api/rates/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, history) = send(&app, Method::GET, "/api/rates/history/USD/EUR", None).await;
    assert_eq!(history.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_duplicate_rate_for_date_conflicts() {
    let app = app().await;
    seed(&app, &["USD", "EUR"], &[("USD", "EUR", 0.9, "2024-01-15")]).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/rates",
        Some(json!({ "rate": 0.95, "currency_base": "USD", "currency_target": "EUR", "date": "2024-01-15" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_cross_rate_through_intermediate_currency() {
    let app = app().await;
    seed(
        &app,
        &["USD", "EUR", "GBP"],
        &[("USD", "EUR", 0.9, "2024-01-15"), ("EUR", "GBP", 0.8, "2024-01-15")],
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/api/rates/rate/USD/GBP/2024-01-15", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!((body["rate"].as_f64().unwrap() - 0.72).abs() < 1e-12);
    assert_eq!(body["currency_base"], "USD");
    assert_eq!(body["currency_target"], "GBP");
    assert_eq!(body["date"], "2024-01-15");
    assert_eq!(body["cross_pairs"], json!([["USD", "EUR"], ["EUR", "GBP"]]));
}

#[tokio::test]
async fn test_inverse_rate_uses_reciprocal() {
    let app = app().await;
    seed(&app, &["USD", "EUR"], &[("USD", "EUR", 0.8, "2024-01-15")]).await;

    let (status, body) = send(&app, Method::GET, "/api/rates/rate/EUR/USD/2024-01-15", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!((body["rate"].as_f64().unwrap() - 1.25).abs() < 1e-12);
    assert_eq!(body["cross_pairs"], json!([["EUR", "USD"]]));
}

#[tokio::test]
async fn test_unreachable_pair_has_null_rate() {
    let app = app().await;
    seed(
        &app,
        &["USD", "EUR", "GBP", "JPY"],
        &[("USD", "EUR", 0.9, "2024-01-15"), ("GBP", "JPY", 190.0, "2024-01-15")],
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/api/rates/rate/USD/JPY/2024-01-15", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rate"], Value::Null);
    assert_eq!(body["cross_pairs"], json!([]));
}

#[tokio::test]
async fn test_no_rates_for_date_is_not_found() {
    let app = app().await;
    seed(&app, &["USD", "EUR"], &[("USD", "EUR", 0.9, "2024-01-15")]).await;

    let (status, body) = send(&app, Method::GET, "/api/rates/rate/USD/EUR/2024-01-16", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No rates USD/EUR for 2024-01-16.");
}

#[tokio::test]
async fn test_rate_lookup_rejects_bad_input() {
    let app = app().await;
    seed(&app, &["USD", "EUR"], &[("USD", "EUR", 0.9, "2024-01-15")]).await;

    let (status, _) = send(&app, Method::GET, "/api/rates/rate/USD/EUR/15-01-2024", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/api/rates/rate/USDX/EUR/2024-01-15", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/api/rates/rate/USD/USD/2024-01-15", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "FX Rates Service API");
}
