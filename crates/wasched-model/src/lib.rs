mod config;
pub use config::{
    CONFIG_API_VERSION, CONFIG_KIND, DEFAULT_SCHEDULER_NAME, GUEST_URL_ARG, PluginConfig,
    PluginRef, PluginSet, Plugins, Profile, SchedulerConfiguration,
};

mod error;
pub use error::{ModelError, ModelResult};

mod intstr;
pub use intstr::{IntOrString, IntOrStringKind, IntOrStringProto};
