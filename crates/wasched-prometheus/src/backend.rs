use std::{sync::Arc, time::Duration};

use prometheus::{
    CounterVec, Encoder, HistogramOpts, HistogramVec, IntGaugeVec, Opts, Registry, TextEncoder,
    proto::MetricFamily,
};

use wasched_core::MetricsBackend;

const NAMESPACE: &str = "wasched";

/// Prometheus metrics backend.
///
/// Label cardinality is bounded by the configuration: `plugin` takes only registered names,
/// `error_kind` only the values of `PluginError::as_label`.
#[derive(Clone)]
pub struct PrometheusMetrics {
    plugins_registered: CounterVec,
    plugins_instantiated: CounterVec,
    instantiation_duration: HistogramVec,
    plugin_errors: CounterVec,
    registry: Arc<Registry>,
}

impl PrometheusMetrics {
    /// Create the backend on a caller-provided registry.
    ///
    /// `version` is exported through `wasched_build_info`.
    pub fn new_with_registry(
        registry: Arc<Registry>,
        version: &str,
    ) -> Result<Self, prometheus::Error> {
        let plugins_registered = CounterVec::new(
            Opts::new("plugins_registered_total", "Plugin factories registered").namespace(NAMESPACE),
            &["plugin"],
        )?;
        registry.register(Box::new(plugins_registered.clone()))?;

        let plugins_instantiated = CounterVec::new(
            Opts::new("plugins_instantiated_total", "Plugins instantiated by their factory")
                .namespace(NAMESPACE),
            &["plugin"],
        )?;
        registry.register(Box::new(plugins_instantiated.clone()))?;

        let instantiation_duration = HistogramVec::new(
            HistogramOpts::new(
                "plugin_instantiation_seconds",
                "Time spent inside plugin factories",
            )
            .namespace(NAMESPACE)
            .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["plugin"],
        )?;
        registry.register(Box::new(instantiation_duration.clone()))?;

        let plugin_errors = CounterVec::new(
            Opts::new("plugin_errors_total", "Failed plugin instantiations").namespace(NAMESPACE),
            &["plugin", "error_kind"],
        )?;
        registry.register(Box::new(plugin_errors.clone()))?;

        let build_info = IntGaugeVec::new(
            Opts::new("build_info", "Build information, value is always 1").namespace(NAMESPACE),
            &["version"],
        )?;
        registry.register(Box::new(build_info.clone()))?;
        build_info.with_label_values(&[version]).set(1);

        Ok(Self {
            plugins_registered,
            plugins_instantiated,
            instantiation_duration,
            plugin_errors,
            registry,
        })
    }

    /// Create the backend on a fresh registry.
    pub fn new(version: &str) -> Result<Self, prometheus::Error> {
        Self::new_with_registry(Arc::new(Registry::new()), version)
    }

    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Registry contents in the Prometheus text exposition format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl MetricsBackend for PrometheusMetrics {
    fn record_plugin_registered(&self, plugin: &str) {
        self.plugins_registered.with_label_values(&[plugin]).inc();
    }

    fn record_plugin_instantiated(&self, plugin: &str, duration: Duration) {
        self.plugins_instantiated.with_label_values(&[plugin]).inc();
        self.instantiation_duration
            .with_label_values(&[plugin])
            .observe(duration.as_secs_f64());
    }

    fn record_plugin_error(&self, plugin: &str, error_kind: &str) {
        self.plugin_errors
            .with_label_values(&[plugin, error_kind])
            .inc();
    }
}
