//! Route handlers.

pub mod health;
pub mod info;
pub mod metrics;
pub mod not_found;
pub mod welcome;

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::ApiError;
use crate::format;

/// Builds an `application/json` response with an indented body.
pub(crate) fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    match format::json(body) {
        Ok(text) => (status, [(header::CONTENT_TYPE, "application/json")], text).into_response(),
        Err(err) => ApiError::Internal(format!("failed to serialize response: {err}")).into_response(),
    }
}
