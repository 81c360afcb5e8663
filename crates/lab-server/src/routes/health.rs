//! Health check endpoint.

use axum::Extension;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use serde::Serialize;

use crate::context::RequestContext;
use crate::routes::json_response;
use crate::runtime;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse<'a> {
    pub status: &'static str,
    pub timestamp: String,
    pub uptime: f64,
    pub environment: &'a str,
    pub version: &'static str,
    pub rust_version: &'static str,
    pub requests_served: u64,
}

/// `/health` — liveness probe. Performs no dependency checks and never fails.
pub async fn check(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Response {
    json_response(
        StatusCode::OK,
        &HealthResponse {
            status: "healthy",
            timestamp: ctx.timestamp(),
            uptime: state.uptime(),
            environment: state.environment(),
            version: runtime::APP_VERSION,
            rust_version: runtime::RUST_VERSION,
            requests_served: ctx.sequence,
        },
    )
}
