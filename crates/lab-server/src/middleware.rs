//! Request tracking middleware and fixed response headers.

use axum::extract::{Request, State};
use axum::http::header::{self, HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;

use crate::context::RequestContext;
use crate::counter::RequestCounter;

/// Headers set on every response, whatever the path or status.
pub fn response_headers() -> [(HeaderName, HeaderValue); 6] {
    [
        (
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, PUT, DELETE"),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ),
        (
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ),
        (header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY")),
        (
            header::X_XSS_PROTECTION,
            HeaderValue::from_static("1; mode=block"),
        ),
    ]
}

/// Counts the request, logs it, and hands its [`RequestContext`] to the handler.
///
/// Runs for matched and unmatched paths alike.
pub async fn track_request(
    State(counter): State<RequestCounter>,
    mut req: Request,
    next: Next,
) -> Response {
    let sequence = counter.increment();
    let ctx = RequestContext::from_request(&req, sequence);

    tracing::info!(
        timestamp = %ctx.timestamp(),
        method = %ctx.method,
        path = %ctx.path,
        user_agent = %ctx.user_agent,
        "request"
    );

    req.extensions_mut().insert(ctx);
    next.run(req).await
}
