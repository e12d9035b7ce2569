//! HTTP surface exposing the parsed feed as JSON

use crate::core::RatesProvider;
use crate::core::config::ServerConfig;
use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::header::{
    CACHE_CONTROL, STRICT_TRANSPORT_SECURITY, X_FRAME_OPTIONS, X_XSS_PROTECTION,
};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    provider: Arc<dyn RatesProvider>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    timestamp: String,
}

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
    timestamp: String,
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn router(provider: Arc<dyn RatesProvider>) -> Router {
    let headers = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            X_XSS_PROTECTION,
            HeaderValue::from_static("1; mode=block"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=300"),
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET]),
        );

    Router::new()
        .route("/api/cnb/daily", get(daily_rates))
        .route("/health", get(health))
        .layer(headers)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { provider })
}

async fn daily_rates(State(state): State<AppState>) -> Response {
    match state.provider.fetch_daily().await {
        Ok(data) => Json(data).into_response(),
        Err(e) => {
            // Upstream detail stays in the log
            error!("CNB API error: {e:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "Server error processing exchange rate data",
                    timestamp: timestamp(),
                }),
            )
                .into_response()
        }
    }
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        timestamp: timestamp(),
    })
}

/// Binds the listener and serves until Ctrl-C.
pub async fn serve(config: &ServerConfig, provider: Arc<dyn RatesProvider>) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(
        "CNB Exchange rates: Server running on http://{}",
        listener.local_addr()?
    );

    axum::serve(listener, router(provider))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await
        .context("Server error")
}
