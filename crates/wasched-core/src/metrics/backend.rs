use std::{sync::Arc, time::Duration};

/// Metrics collection interface for plugin registration and instantiation.
pub trait MetricsBackend: Send + Sync + 'static {
    /// Record that a plugin factory was added to the registry.
    fn record_plugin_registered(&self, plugin: &str);

    /// Record a successful factory invocation.
    ///
    /// # Arguments
    /// - `plugin`: plugin name
    /// - `duration`: time spent inside the factory
    fn record_plugin_instantiated(&self, plugin: &str, duration: Duration);

    /// Record a failed factory invocation.
    ///
    /// # Arguments
    /// - `plugin`: plugin name
    /// - `error_kind`: bounded error category, see [`crate::PluginError::as_label`]
    fn record_plugin_error(&self, plugin: &str, error_kind: &str);
}

/// Shared handle to a metrics backend.
pub type MetricsHandle = Arc<dyn MetricsBackend>;
