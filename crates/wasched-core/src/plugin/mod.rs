//! Plugin abstraction consumed by the scheduler command.
//!
//! A plugin is created by a [`PluginFactory`] when the scheduler sets up a profile that configures it.
mod error;
pub use error::PluginError;

mod context;
pub use context::BuildContext;

use std::sync::Arc;

use serde_json::Value;

/// Scheduler extension plugin.
pub trait Plugin: Send + Sync {
    /// Name the plugin was registered and configured under.
    fn name(&self) -> &str;
}

/// Deferred constructor for one plugin.
///
/// Invoked with the profile's `pluginConfig` args for that plugin (`Value::Null` when none)
/// and the shared build context.
pub type PluginFactory =
    Arc<dyn Fn(&Value, &BuildContext) -> Result<Arc<dyn Plugin>, PluginError> + Send + Sync>;
