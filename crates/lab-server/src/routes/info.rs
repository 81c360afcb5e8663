//! System information endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use serde::Serialize;

use crate::memory::MemoryUsage;
use crate::routes::json_response;
use crate::runtime;
use crate::state::AppState;

#[derive(Serialize)]
pub struct InfoResponse<'a> {
    pub platform: &'static str,
    pub architecture: &'static str,
    pub rust_version: &'static str,
    pub memory_usage: MemoryUsage,
    pub environment: &'a str,
    pub pid: u32,
    pub uptime: f64,
}

/// `/info` — platform, toolchain and process details.
pub async fn get(State(state): State<AppState>) -> Response {
    json_response(
        StatusCode::OK,
        &InfoResponse {
            platform: runtime::platform(),
            architecture: runtime::architecture(),
            rust_version: runtime::RUST_VERSION,
            memory_usage: MemoryUsage::snapshot(),
            environment: state.environment(),
            pid: std::process::id(),
            uptime: state.uptime(),
        },
    )
}
