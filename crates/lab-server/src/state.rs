//! Shared application state handed to every handler.

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::counter::RequestCounter;

/// Shared application state accessible from all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub counter: RequestCounter,
    started_at: Instant,
}

impl AppState {
    /// Creates state with a fresh counter; uptime is measured from this call.
    pub fn new(config: Config) -> Self {
        Self::with_counter(config, RequestCounter::new())
    }

    /// Creates state around an existing counter.
    pub fn with_counter(config: Config, counter: RequestCounter) -> Self {
        Self {
            config: Arc::new(config),
            counter,
            started_at: Instant::now(),
        }
    }

    pub fn environment(&self) -> &str {
        &self.config.environment
    }

    /// Seconds since the state was created.
    pub fn uptime(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}
