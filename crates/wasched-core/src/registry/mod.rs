//! Ordered mapping from plugin name to factory.
//!
//! Built once from the command options; entries keep registration order.
use std::{fmt, sync::Arc, time::Instant};

use serde_json::Value;
use tracing::{debug, instrument, trace};

use crate::{
    error::CoreError,
    plugin::{BuildContext, Plugin, PluginError, PluginFactory},
};

struct RegistryEntry {
    name: String,
    factory: PluginFactory,
}

/// Out-of-tree plugin registry.
///
/// Names are unique; a second registration under the same name is rejected.
#[derive(Default)]
pub struct Registry {
    entries: Vec<RegistryEntry>,
}

impl Registry {
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a factory under `name`.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: PluginFactory,
    ) -> Result<(), CoreError> {
        let name = name.into();
        if self.contains(&name) {
            return Err(CoreError::DuplicatePlugin(name));
        }
        trace!(plugin = %name, "plugin factory registered");
        self.entries.push(RegistryEntry { name, factory });
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&PluginFactory> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.factory)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invoke the factory registered under `name`.
    ///
    /// Returns `Ok(None)` when no factory is registered, so callers can skip in-tree plugins.
    #[instrument(level = "debug", skip(self, args, ctx), fields(profile = %ctx.profile()))]
    pub fn instantiate(
        &self,
        name: &str,
        args: &Value,
        ctx: &BuildContext,
    ) -> Result<Option<Arc<dyn Plugin>>, PluginError> {
        let Some(factory) = self.get(name) else {
            return Ok(None);
        };

        let started = Instant::now();
        match factory(args, ctx) {
            Ok(plugin) => {
                let elapsed = started.elapsed();
                ctx.metrics().record_plugin_instantiated(name, elapsed);
                debug!(elapsed = ?elapsed, "plugin instantiated");
                Ok(Some(plugin))
            }
            Err(e) => {
                ctx.metrics().record_plugin_error(name, e.as_label());
                Err(e)
            }
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
