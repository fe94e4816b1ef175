pub mod command;
pub mod error;
pub mod metrics;
pub mod plugin;
pub mod registry;

pub use command::{
    ProfileRuntime, Scheduler, SchedulerCommand, SchedulerOption, SchedulerSettings,
    new_scheduler_command,
};
pub use error::CoreError;
pub use metrics::{MetricsBackend, MetricsHandle, NoOpMetrics, noop_metrics};
pub use plugin::{BuildContext, Plugin, PluginError, PluginFactory};
pub use registry::Registry;

pub mod prelude {
    pub use crate::command::{SchedulerCommand, SchedulerOption, new_scheduler_command};
    pub use crate::error::CoreError;
    pub use crate::plugin::{BuildContext, Plugin, PluginError, PluginFactory};
    pub use crate::registry::Registry;
}
