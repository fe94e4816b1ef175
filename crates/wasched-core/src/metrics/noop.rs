use std::time::Duration;

use crate::metrics::backend::MetricsBackend;

/// Metrics backend that records nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMetrics;

impl MetricsBackend for NoOpMetrics {
    #[inline(always)]
    fn record_plugin_registered(&self, _: &str) {}

    #[inline(always)]
    fn record_plugin_instantiated(&self, _: &str, _: Duration) {}

    #[inline(always)]
    fn record_plugin_error(&self, _: &str, _: &str) {}
}
