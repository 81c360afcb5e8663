//! Error types for the server lifecycle and HTTP responses.

use std::io;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinError;

use crate::routes::json_response;

/// Errors that stop the server from starting or running.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listening socket could not be bound. Fatal at startup.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// The accept loop failed.
    #[error("server error: {0}")]
    Serve(#[from] io::Error),

    /// The task running a spawned server panicked or was cancelled.
    #[error("server task failed: {0}")]
    Join(#[from] JoinError),
}

/// Result type for server lifecycle operations.
pub type Result<T> = std::result::Result<T, ServerError>;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// No route matches the requested path.
    NotFound { path: String, timestamp: String },
    /// Internal server error.
    Internal(String),
}

#[derive(Serialize)]
struct NotFoundBody<'a> {
    error: &'static str,
    message: String,
    timestamp: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound { path, timestamp } => json_response(
                StatusCode::NOT_FOUND,
                &NotFoundBody {
                    error: "Not Found",
                    message: format!("Route {path} not found"),
                    timestamp: &timestamp,
                },
            ),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                let body = serde_json::json!({ "error": "Internal Server Error", "message": msg });
                (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
            }
        }
    }
}
