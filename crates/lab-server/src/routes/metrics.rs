//! Prometheus metrics endpoint.

use axum::Extension;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;

use crate::context::RequestContext;
use crate::format::{self, MetricsSnapshot};
use crate::memory::MemoryUsage;
use crate::state::AppState;

/// `/metrics` — returns Prometheus-formatted metrics.
pub async fn get(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> impl IntoResponse {
    let snapshot = MetricsSnapshot {
        requests_total: ctx.sequence,
        uptime_seconds: state.uptime(),
        memory: MemoryUsage::snapshot(),
    };

    (
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        format::prometheus(&snapshot),
    )
}
