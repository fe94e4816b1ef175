use std::fmt;

use crate::metrics::{MetricsHandle, noop_metrics};

/// Shared context handed to every factory invocation.
#[derive(Clone)]
pub struct BuildContext {
    profile: String,
    metrics: MetricsHandle,
}

impl BuildContext {
    pub fn new(profile: impl Into<String>, metrics: MetricsHandle) -> Self {
        Self {
            profile: profile.into(),
            metrics,
        }
    }

    /// Scheduler name of the profile being set up.
    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn metrics(&self) -> &MetricsHandle {
        &self.metrics
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    pub fn with_metrics(mut self, metrics: MetricsHandle) -> Self {
        self.metrics = metrics;
        self
    }
}

impl Default for BuildContext {
    fn default() -> Self {
        Self {
            profile: wasched_model::DEFAULT_SCHEDULER_NAME.to_string(),
            metrics: noop_metrics(),
        }
    }
}

impl fmt::Debug for BuildContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildContext")
            .field("profile", &self.profile)
            .field("metrics", &"<handle>")
            .finish()
    }
}

impl fmt::Display for BuildContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BuildContext(profile={})", self.profile)
    }
}
