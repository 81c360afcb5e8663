//! Welcome page.

use axum::Extension;
use axum::extract::State;
use axum::response::Html;

use crate::context::RequestContext;
use crate::format::{self, WelcomePage};
use crate::state::AppState;

/// `/` — HTML landing page listing the available endpoints.
pub async fn get(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Html<String> {
    let timestamp = ctx.timestamp();
    Html(format::welcome_page(&WelcomePage {
        environment: state.environment(),
        timestamp: &timestamp,
        requests_served: ctx.sequence,
    }))
}
