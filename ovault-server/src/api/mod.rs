//! HTTP API surface.
//!
//! # Endpoints
//!
//! - `GET  /api/health`             – server status
//! - `GET  /api/metrics`            – metrics placeholder
//! - `/api/early-access/...`        – signup pipeline (see [`early_access`])
//! - `/api/vault/...`               – on-chain event projections (see [`vault`])
//!
//! Everything under `/api` goes through the per-IP rate limit.

pub mod early_access;
pub mod extractors;
pub mod rate_limit;
pub mod vault;

use axum::{Json, Router, response::IntoResponse, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// Build the `/api` router.
pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/health", get(crate::server::health_check))
        .route("/metrics", get(metrics))
        .nest("/early-access", early_access::router())
        .nest("/vault", vault::router())
        .layer(axum::middleware::from_fn_with_state(
            state,
            rate_limit::rate_limit,
        ))
}

#[derive(Serialize)]
struct MetricsResponse {
    status: &'static str,
    timestamp: i64,
}

/// `GET /api/metrics` — static placeholder until a real metrics
/// pipeline exists.
async fn metrics() -> impl IntoResponse {
    Json(MetricsResponse {
        status: "ok",
        timestamp: time::OffsetDateTime::now_utc().unix_timestamp(),
    })
}
