//! Prometheus metrics backend for plugin lifecycle events.
//!
//! [`PrometheusMetrics`] implements [`wasched_core::MetricsBackend`] and is handed to the scheduler
//! command through [`wasched_core::SchedulerOption::with_metrics`].
//!
//! ## Metrics
//! - `wasched_plugins_registered_total{plugin}` - Counter
//! - `wasched_plugins_instantiated_total{plugin}` - Counter
//! - `wasched_plugin_instantiation_seconds{plugin}` - Histogram
//! - `wasched_plugin_errors_total{plugin, error_kind}` - Counter
//! - `wasched_build_info{version}` - Gauge, always 1
//!
//! No HTTP endpoint is served here. [`PrometheusMetrics::render`] produces the text format for one.
mod backend;
pub use backend::PrometheusMetrics;

pub use prometheus::{Encoder, Registry, TextEncoder};
