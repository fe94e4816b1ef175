//! Metrics seam for plugin lifecycle events.
//!
//! Backends (prometheus, statsd, etc) implement [`MetricsBackend`] and reach plugins through [`crate::BuildContext`].
mod backend;
pub use backend::{MetricsBackend, MetricsHandle};

mod noop;
pub use noop::NoOpMetrics;

use std::sync::Arc;

/// Create a no-op metrics handle.
#[inline]
pub fn noop_metrics() -> MetricsHandle {
    Arc::new(NoOpMetrics)
}
