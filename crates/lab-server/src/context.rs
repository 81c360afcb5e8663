//! Per-request context captured before routing.

use axum::http::{Method, Request, header};
use chrono::{DateTime, Utc};

use crate::format;

/// Logged in place of a missing or non-UTF-8 `User-Agent` header.
pub const UNKNOWN_USER_AGENT: &str = "Unknown";

/// What the server knows about a request when it arrives.
///
/// Inserted into the request extensions by the tracking middleware and read
/// back by handlers, so every handler sees the same timestamp and counter
/// value that were logged.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    /// Request path with the query string stripped.
    pub path: String,
    pub user_agent: String,
    pub received_at: DateTime<Utc>,
    /// Counter value after this request was recorded.
    pub sequence: u64,
}

impl RequestContext {
    /// Captures the context of `req`, stamped with the current time.
    pub fn from_request<B>(req: &Request<B>, sequence: u64) -> Self {
        let user_agent = req
            .headers()
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .unwrap_or(UNKNOWN_USER_AGENT)
            .to_string();

        Self {
            method: req.method().clone(),
            path: req.uri().path().to_string(),
            user_agent,
            received_at: Utc::now(),
            sequence,
        }
    }

    /// Arrival time as an ISO-8601 string.
    pub fn timestamp(&self) -> String {
        format::timestamp(self.received_at)
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;

    use super::*;

    #[test]
    fn test_captures_method_path_and_user_agent() {
        let req = Request::builder()
            .method("POST")
            .uri("/health?verbose=1")
            .header("user-agent", "kube-probe/1.29")
            .body(Body::empty())
            .unwrap();

        let ctx = RequestContext::from_request(&req, 5);
        assert_eq!(ctx.method, Method::POST);
        assert_eq!(ctx.path, "/health");
        assert_eq!(ctx.user_agent, "kube-probe/1.29");
        assert_eq!(ctx.sequence, 5);
    }

    #[test]
    fn test_missing_user_agent_uses_placeholder() {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let ctx = RequestContext::from_request(&req, 1);
        assert_eq!(ctx.user_agent, UNKNOWN_USER_AGENT);
    }

    #[test]
    fn test_timestamp_round_trips_through_rfc3339() {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let ctx = RequestContext::from_request(&req, 1);
        let parsed = DateTime::parse_from_rfc3339(&ctx.timestamp()).unwrap();
        assert_eq!(
            parsed.timestamp_millis(),
            ctx.received_at.timestamp_millis()
        );
    }
}
