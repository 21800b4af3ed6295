//! Shared application state

use std::sync::Arc;
use std::time::Duration;

use crate::cache::ChartCache;
use crate::github::StarSource;

/// Process-wide handles injected into every handler.
#[derive(Clone)]
pub struct AppState {
    /// Upstream star data
    pub stars: Arc<dyn StarSource>,
    /// Rendered chart cache
    pub cache: Arc<dyn ChartCache>,
    /// How long a rendered chart stays cached
    pub cache_ttl: Duration,
    /// Deadline for upstream-bound requests
    pub request_timeout: Duration,
    /// Shown in page footers
    pub version: &'static str,
}

impl AppState {
    pub fn new(
        stars: Arc<dyn StarSource>,
        cache: Arc<dyn ChartCache>,
        cache_ttl: Duration,
        request_timeout: Duration,
    ) -> Self {
        Self {
            stars,
            cache,
            cache_ttl,
            request_timeout,
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}
