//! Axum server setup and router configuration.

use crate::api;
use crate::config::runtime::ServerConfig;
use crate::shutdown::shutdown_signal;
use crate::state::AppState;
use axum::{
    Json, Router,
    http::{HeaderValue, Method, header},
    response::IntoResponse,
    routing::get,
};
use serde::Serialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Build the main application router.
///
/// `/health` and everything under `/api` are handled here; any other
/// GET falls through to the built single-page app.
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    let spa = ServeDir::new(&server.spa_dist)
        .not_found_service(ServeFile::new(server.spa_dist.join("index.html")));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api::router(state.clone()))
        .fallback_service(spa)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&server.cors_origins))
        .with_state(state)
}

/// Build the CORS layer from the configured origins. An empty origin
/// list allows any origin (development mode).
fn cors_layer(origins: &[String]) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::PUT, Method::DELETE];
    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers([
                header::CONTENT_TYPE,
                header::HeaderName::from_static("ovault-admin-authorization"),
            ])
    }
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: i64,
}

/// Simple health check - returns OK if the server is running.
pub(crate) async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        timestamp: time::OffsetDateTime::now_utc().unix_timestamp(),
    })
}

/// Run the server with graceful shutdown support.
pub async fn run_server(router: Router, addr: SocketAddr) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
}
