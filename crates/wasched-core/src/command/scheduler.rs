use std::{fmt, future::Future, sync::Arc};

use tracing::info;

use crate::{command::SchedulerSettings, plugin::Plugin};

/// Plugins instantiated for one profile, in configuration order.
pub struct ProfileRuntime {
    name: String,
    plugins: Vec<Arc<dyn Plugin>>,
}

impl ProfileRuntime {
    pub(crate) fn new(name: String, plugins: Vec<Arc<dyn Plugin>>) -> Self {
        Self { name, plugins }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn plugins(&self) -> &[Arc<dyn Plugin>] {
        &self.plugins
    }

    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }
}

impl fmt::Debug for ProfileRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileRuntime")
            .field("name", &self.name)
            .field("plugins", &self.plugin_names())
            .finish()
    }
}

/// Scheduler after setup, ready to run.
#[derive(Debug)]
pub struct Scheduler {
    settings: SchedulerSettings,
    profiles: Vec<ProfileRuntime>,
}

impl Scheduler {
    pub(crate) fn new(settings: SchedulerSettings, profiles: Vec<ProfileRuntime>) -> Self {
        Self { settings, profiles }
    }

    pub fn profiles(&self) -> &[ProfileRuntime] {
        &self.profiles
    }

    pub fn settings(&self) -> &SchedulerSettings {
        &self.settings
    }

    /// Run until `shutdown` resolves.
    ///
    /// Scheduling cycles belong to the scheduling framework; this loop only owns
    /// the lifetime of the instantiated plugins.
    pub async fn run<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        info!(
            profiles = self.profiles.len(),
            leader_elect = self.settings.leader_elect,
            master = self.settings.master.as_deref().unwrap_or(""),
            "scheduler started"
        );
        shutdown.await;
        info!("scheduler shutting down");
    }
}
