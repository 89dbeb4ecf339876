//! Application startup and lifecycle management.

use crate::config::DiagnosticConfig;
use crate::handlers::{
    diagnostic::{create_diagnostic, preflight, DIAGNOSTIC_PATH},
    health::{health_check, readiness_check},
    metrics::metrics,
    page::{index, render_fragment, RENDER_PATH},
};
use crate::middleware::cors::cors_headers_middleware;
use crate::services::metrics::init_metrics;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::TextProvider;
use crate::services::DiagnosticGenerator;
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::tracing::{request_id_middleware, REQUEST_ID_HEADER};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: DiagnosticConfig,
    pub generator: DiagnosticGenerator,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route(DIAGNOSTIC_PATH, post(create_diagnostic).options(preflight))
        .route(RENDER_PATH, post(render_fragment))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics))
        .layer(from_fn(cors_headers_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with Gemini-backed primary and fallback models.
    pub async fn build(config: DiagnosticConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::new();
        let provider = |model: &str| -> Arc<dyn TextProvider> {
            Arc::new(GeminiTextProvider::with_client(
                GeminiConfig {
                    api_key: config.google.api_key.clone(),
                    model: model.to_string(),
                    api_base: config.google.api_base.clone(),
                },
                client.clone(),
            ))
        };
        let primary = provider(&config.models.primary_model);
        let fallback = provider(&config.models.fallback_model);

        if config.google.api_key.is_empty() {
            tracing::warn!("GOOGLE_API_KEY is not set; every diagnostic request will fail");
        }

        tracing::info!(
            primary = %config.models.primary_model,
            fallback = %config.models.fallback_model,
            "Initialized Gemini text providers"
        );

        Self::build_with_providers(config, primary, fallback).await
    }

    /// Build the application around explicit providers (used by tests).
    pub async fn build_with_providers(
        config: DiagnosticConfig,
        primary: Arc<dyn TextProvider>,
        fallback: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        init_metrics().map_err(|e| AppError::InternalError(anyhow::Error::new(e)))?;

        let state = AppState {
            generator: DiagnosticGenerator::new(primary, fallback),
            config,
        };

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], state.config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Diagnostic service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until the server fails.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.run_with_graceful_shutdown(std::future::pending()).await
    }

    /// Run the application until `signal` resolves, then drain in-flight requests.
    pub async fn run_with_graceful_shutdown<F>(self, signal: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(signal)
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}
