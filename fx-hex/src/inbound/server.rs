//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use fx_types::RatesRepository;

use super::handlers::{self, AppState};
use crate::RatesService;
use crate::openapi::ApiDoc;

/// HTTP Server for the FX rates API.
pub struct HttpServer<R: RatesRepository> {
    state: Arc<AppState<R>>,
}

impl<R: RatesRepository> HttpServer<R> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: RatesService<R>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        let api = Router::new()
            .route("/health", get(handlers::health))
            .route(
                "/api/currencies",
                post(handlers::create_currency::<R>).get(handlers::list_currencies::<R>),
            )
            // PUT addresses a currency by id, DELETE by code.
            .route(
                "/api/currencies/{key}",
                put(handlers::update_currency::<R>).delete(handlers::delete_currency::<R>),
            )
            .route("/api/rates", post(handlers::create_rate::<R>))
            .route(
                "/api/rates/{id}",
                get(handlers::get_rate::<R>)
                    .put(handlers::update_rate::<R>)
                    .delete(handlers::delete_rate::<R>),
            )
            .route(
                "/api/rates/history/{base}/{target}",
                get(handlers::rate_history::<R>),
            )
            .route(
                "/api/rates/rate/{base}/{target}/{date}",
                get(handlers::rate_for_date::<R>),
            )
            .with_state(self.state.clone());

        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
            .merge(api)
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
