//! Process-wide request counter.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic count of inbound requests.
///
/// Clones share the same underlying value, so the counter can be handed to
/// the router state and still be read from outside (e.g. by tests).
#[derive(Debug, Clone, Default)]
pub struct RequestCounter(Arc<AtomicU64>);

impl RequestCounter {
    /// Creates a counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one request and returns the count including it.
    pub fn increment(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Returns the current count.
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}
