//! Axum router assembly.

use axum::Router;
use axum::extract::Request;
use axum::routing::get;
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;

use devices_app::ports::DeviceRepository;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests API routes under `/api` and exposes `/health` and `/openapi.json`.
/// Includes a [`TraceLayer`] that opens a span per request (method and URI)
/// and logs the response status and latency at `INFO`.
pub fn build<DR>(state: AppState<DR>) -> Router
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
            )
        })
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    Router::new()
        .route("/health", get(health_check))
        .route("/openapi.json", get(crate::openapi::openapi_json))
        .nest("/api", crate::api::routes())
        .layer(trace_layer)
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
