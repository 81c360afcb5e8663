//! Lightweight HTTP status server.
//!
//! Serves a welcome page, a health probe, a system-information report and a
//! Prometheus metrics endpoint. Every request is counted, logged with
//! `tracing`, and answered with fixed CORS and security headers.

pub mod config;
pub mod context;
pub mod counter;
pub mod error;
pub mod format;
pub mod memory;
pub mod middleware;
pub mod routes;
pub mod runtime;
pub mod server;
pub mod state;

pub use config::Config;
pub use counter::RequestCounter;
pub use error::{ApiError, ServerError};
pub use server::{Server, ServerHandle, ServerState, shutdown_signal};
pub use state::AppState;

use axum::Router;
use axum::routing::any;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

/// Creates the Axum application router with all routes and shared state.
///
/// Routing is by exact path and ignores the HTTP method.
pub fn create_app(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/", any(routes::welcome::get))
        .route("/health", any(routes::health::check))
        .route("/info", any(routes::info::get))
        .route("/metrics", any(routes::metrics::get))
        .fallback(routes::not_found::fallback)
        .layer(axum::middleware::from_fn_with_state(
            state.counter.clone(),
            middleware::track_request,
        ))
        .with_state(state);

    for (name, value) in middleware::response_headers() {
        app = app.layer(SetResponseHeaderLayer::overriding(name, value));
    }

    app.layer(TraceLayer::new_for_http())
}
