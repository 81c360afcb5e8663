//! Response body formatters.
//!
//! Pure functions turning in-memory data into HTTP bodies:
//! - [`json`] — pretty-printed JSON (two-space indent)
//! - [`welcome_page`] — the HTML landing page
//! - [`prometheus`] — Prometheus text exposition format

use std::fmt::{self, Write};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::memory::MemoryUsage;

/// Formats a timestamp as ISO-8601 with millisecond precision and a `Z` suffix.
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serializes a value as indented JSON.
pub fn json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// Values interpolated into the welcome page.
#[derive(Debug, Clone)]
pub struct WelcomePage<'a> {
    pub environment: &'a str,
    pub timestamp: &'a str,
    pub requests_served: u64,
}

const WELCOME_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>DevOps Lab 2025</title>
  <style>
    body { font-family: Arial, sans-serif; max-width: 800px; margin: 50px auto; padding: 20px; }
    .header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 20px; border-radius: 8px; }
    .endpoint { background: #f8f9fa; padding: 15px; margin: 10px 0; border-radius: 5px; border-left: 4px solid #007bff; }
  </style>
</head>
<body>
  <div class="header">
    <h1>DevOps Lab 2025</h1>
    <p>Lightweight Rust status server with CI/CD pipeline</p>
  </div>
  <h2>Available Endpoints:</h2>
  <div class="endpoint"><strong>GET /</strong> - This welcome page</div>
  <div class="endpoint"><strong>GET /health</strong> - Health check (JSON)</div>
  <div class="endpoint"><strong>GET /info</strong> - System information</div>
  <div class="endpoint"><strong>GET /metrics</strong> - Prometheus metrics</div>
"#;

/// Renders the HTML landing page.
pub fn welcome_page(page: &WelcomePage<'_>) -> String {
    let mut html = String::with_capacity(WELCOME_HEAD.len() + 256);
    html.push_str(WELCOME_HEAD);
    let _ = writeln!(
        html,
        "  <p>Environment: <strong>{}</strong></p>",
        html_escape::encode_text(page.environment)
    );
    let _ = writeln!(
        html,
        "  <p>Server time: <strong>{}</strong></p>",
        html_escape::encode_text(page.timestamp)
    );
    let _ = writeln!(
        html,
        "  <p>Requests served: <strong>{}</strong></p>",
        page.requests_served
    );
    html.push_str("</body>\n</html>\n");
    html
}

/// Prometheus metric type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricKind::Counter => f.write_str("counter"),
            MetricKind::Gauge => f.write_str("gauge"),
        }
    }
}

/// Everything the metrics endpoint reports.
#[derive(Debug, Clone, Copy)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub uptime_seconds: f64,
    pub memory: MemoryUsage,
}

const NO_LABELS: &[(&str, &str)] = &[];

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Writes one metric family: `# HELP`, `# TYPE`, then one line per sample.
fn write_family<V: fmt::Display>(
    out: &mut String,
    name: &str,
    help: &str,
    kind: MetricKind,
    samples: &[(&[(&str, &str)], V)],
) {
    if !out.is_empty() {
        out.push('\n');
    }
    let _ = writeln!(out, "# HELP {name} {help}");
    let _ = writeln!(out, "# TYPE {name} {kind}");
    for (labels, value) in samples {
        if labels.is_empty() {
            let _ = writeln!(out, "{name} {value}");
        } else {
            let label_str = labels
                .iter()
                .map(|(k, v)| format!("{k}=\"{}\"", escape_label(v)))
                .collect::<Vec<_>>()
                .join(",");
            let _ = writeln!(out, "{name}{{{label_str}}} {value}");
        }
    }
}

/// Renders the metrics snapshot in Prometheus text exposition format.
pub fn prometheus(snapshot: &MetricsSnapshot) -> String {
    let mut out = String::with_capacity(768);

    write_family(
        &mut out,
        "http_requests_total",
        "Total HTTP requests",
        MetricKind::Counter,
        &[(NO_LABELS, snapshot.requests_total)],
    );

    write_family(
        &mut out,
        "app_uptime_seconds",
        "Application uptime in seconds",
        MetricKind::Gauge,
        &[(NO_LABELS, snapshot.uptime_seconds)],
    );

    let series = snapshot.memory.series();
    let labels: Vec<[(&str, &str); 1]> = series.iter().map(|(t, _)| [("type", *t)]).collect();
    let samples: Vec<(&[(&str, &str)], u64)> = labels
        .iter()
        .zip(series.iter())
        .map(|(label, (_, value))| (label.as_slice(), *value))
        .collect();
    write_family(
        &mut out,
        "nodejs_memory_usage_bytes",
        "Node.js memory usage",
        MetricKind::Gauge,
        &samples,
    );

    out
}
