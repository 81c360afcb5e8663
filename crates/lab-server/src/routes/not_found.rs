//! Fallback for unmatched paths.

use axum::Extension;

use crate::context::RequestContext;
use crate::error::ApiError;

/// Any path without a route — structured 404 naming the path.
pub async fn fallback(Extension(ctx): Extension<RequestContext>) -> ApiError {
    let timestamp = ctx.timestamp();
    ApiError::NotFound {
        path: ctx.path,
        timestamp,
    }
}
