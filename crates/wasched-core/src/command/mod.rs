//! Scheduler command: the consumer of plugin registration options.
//!
//! [`new_scheduler_command`] only records the options. Work starts in [`SchedulerCommand::setup`],
//! which builds the [`Registry`], loads the configuration and invokes factories.
mod settings;
pub use settings::SchedulerSettings;

mod scheduler;
pub use scheduler::{ProfileRuntime, Scheduler};

use std::{fmt, fs, future::Future};

use tracing::{debug, info, instrument};
use wasched_model::SchedulerConfiguration;

use crate::{
    error::CoreError,
    metrics::{MetricsHandle, noop_metrics},
    plugin::{BuildContext, PluginFactory},
    registry::Registry,
};

/// Option applied when the command sets up the scheduler.
pub enum SchedulerOption {
    /// Register an out-of-tree plugin factory under `name`.
    Plugin { name: String, factory: PluginFactory },
    /// Metrics backend handed to factories through [`BuildContext`].
    Metrics(MetricsHandle),
}

impl SchedulerOption {
    pub fn with_plugin(name: impl Into<String>, factory: PluginFactory) -> Self {
        SchedulerOption::Plugin {
            name: name.into(),
            factory,
        }
    }

    pub fn with_metrics(metrics: MetricsHandle) -> Self {
        SchedulerOption::Metrics(metrics)
    }

    /// Plugin name for [`SchedulerOption::Plugin`].
    pub fn plugin_name(&self) -> Option<&str> {
        match self {
            SchedulerOption::Plugin { name, .. } => Some(name),
            SchedulerOption::Metrics(_) => None,
        }
    }

    /// Factory for [`SchedulerOption::Plugin`].
    pub fn factory(&self) -> Option<&PluginFactory> {
        match self {
            SchedulerOption::Plugin { factory, .. } => Some(factory),
            SchedulerOption::Metrics(_) => None,
        }
    }
}

impl fmt::Debug for SchedulerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerOption::Plugin { name, .. } => f
                .debug_struct("Plugin")
                .field("name", name)
                .field("factory", &"<fn>")
                .finish(),
            SchedulerOption::Metrics(_) => f.debug_tuple("Metrics").field(&"<handle>").finish(),
        }
    }
}

/// Runnable top-level scheduler command.
#[derive(Debug)]
pub struct SchedulerCommand {
    options: Vec<SchedulerOption>,
}

/// Build the scheduler command from an ordered list of options.
pub fn new_scheduler_command(options: Vec<SchedulerOption>) -> SchedulerCommand {
    SchedulerCommand { options }
}

impl SchedulerCommand {
    /// Options in the order they were given.
    pub fn options(&self) -> &[SchedulerOption] {
        &self.options
    }

    /// Build the registry, load configuration and instantiate the configured plugins.
    #[instrument(level = "debug", skip_all, fields(config = ?settings.config))]
    pub fn setup(self, settings: &SchedulerSettings) -> Result<Scheduler, CoreError> {
        let mut registry = Registry::new();
        let mut metrics = noop_metrics();

        for opt in self.options {
            match opt {
                SchedulerOption::Plugin { name, factory } => registry.register(name, factory)?,
                SchedulerOption::Metrics(handle) => metrics = handle,
            }
        }
        for name in registry.names() {
            metrics.record_plugin_registered(name);
        }
        debug!(plugins = ?registry, "out-of-tree registry built");

        let config = load_config(settings)?;
        let base_ctx = BuildContext::default().with_metrics(metrics);

        let mut profiles = Vec::with_capacity(config.profiles.len());
        for profile in &config.profiles {
            let ctx = base_ctx.clone().with_profile(&profile.scheduler_name);
            let mut plugins = Vec::new();

            for name in profile.referenced_plugins() {
                let args = profile.plugin_args(name).unwrap_or(&serde_json::Value::Null);
                let built = registry.instantiate(name, args, &ctx).map_err(|source| {
                    CoreError::Plugin {
                        profile: profile.scheduler_name.clone(),
                        source,
                    }
                })?;
                match built {
                    Some(plugin) => plugins.push(plugin),
                    None => debug!(plugin = name, "not an out-of-tree plugin, skipped"),
                }
            }

            info!(
                profile = %profile.scheduler_name,
                plugins = plugins.len(),
                "profile initialized"
            );
            profiles.push(ProfileRuntime::new(profile.scheduler_name.clone(), plugins));
        }

        Ok(Scheduler::new(settings.clone(), profiles))
    }

    /// Set up the scheduler and run it until `shutdown` resolves.
    pub async fn execute<F>(self, settings: &SchedulerSettings, shutdown: F) -> Result<(), CoreError>
    where
        F: Future<Output = ()>,
    {
        let scheduler = self.setup(settings)?;
        scheduler.run(shutdown).await;
        Ok(())
    }
}

/// Without a config path the scheduler runs one default profile.
fn load_config(settings: &SchedulerSettings) -> Result<SchedulerConfiguration, CoreError> {
    let Some(path) = settings.config.as_deref() else {
        return Ok(SchedulerConfiguration::default());
    };

    let raw = fs::read_to_string(path).map_err(|source| CoreError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    SchedulerConfiguration::from_yaml_str(&raw).map_err(|source| CoreError::Config {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{
        io::Write,
        sync::{
            Arc, Mutex,
            atomic::{AtomicUsize, Ordering},
        },
    };

    use serde_json::Value;

    use crate::plugin::{Plugin, PluginError};

    struct Recorded {
        name: String,
    }

    impl Plugin for Recorded {
        fn name(&self) -> &str {
            &self.name
        }
    }

    type Calls = Arc<Mutex<Vec<(String, Value, String)>>>;

    fn recording_factory(name: &str, calls: Calls) -> PluginFactory {
        let name = name.to_string();
        Arc::new(
            move |args: &Value, ctx: &BuildContext| -> Result<Arc<dyn Plugin>, PluginError> {
                calls.lock().unwrap().push((
                    name.clone(),
                    args.clone(),
                    ctx.profile().to_string(),
                ));
                Ok(Arc::new(Recorded { name: name.clone() }))
            },
        )
    }

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(body.as_bytes()).unwrap();
        f
    }

    fn settings_for(f: &tempfile::NamedTempFile) -> SchedulerSettings {
        SchedulerSettings {
            config: Some(f.path().to_path_buf()),
            ..Default::default()
        }
    }

    const TWO_PROFILES: &str = r#"
apiVersion: kubescheduler.config.k8s.io/v1
kind: KubeSchedulerConfiguration
profiles:
  - schedulerName: first
    plugins:
      filter:
        enabled:
          - name: NodeName
          - name: wasm-bar
    pluginConfig:
      - name: wasm-foo
        args:
          guestURL: foo.wasm
      - name: wasm-bar
        args:
          guestURL: bar.wasm
  - schedulerName: second
    pluginConfig:
      - name: wasm-foo
        args:
          guestURL: other.wasm
"#;

    #[test]
    fn command_keeps_option_order() {
        let calls: Calls = Default::default();
        let cmd = new_scheduler_command(vec![
            SchedulerOption::with_plugin("wasm-foo", recording_factory("wasm-foo", calls.clone())),
            SchedulerOption::with_plugin("wasm-bar", recording_factory("wasm-bar", calls.clone())),
        ]);

        let names: Vec<_> = cmd.options().iter().filter_map(|o| o.plugin_name()).collect();
        assert_eq!(names, vec!["wasm-foo", "wasm-bar"]);
        assert!(calls.lock().unwrap().is_empty(), "building the command must not invoke factories");
    }

    #[test]
    fn setup_instantiates_configured_plugins_per_profile() {
        let f = write_config(TWO_PROFILES);
        let calls: Calls = Default::default();
        let cmd = new_scheduler_command(vec![
            SchedulerOption::with_plugin("wasm-foo", recording_factory("wasm-foo", calls.clone())),
            SchedulerOption::with_plugin("wasm-bar", recording_factory("wasm-bar", calls.clone())),
        ]);

        let scheduler = cmd.setup(&settings_for(&f)).unwrap();

        let profiles = scheduler.profiles();
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].name(), "first");
        assert_eq!(profiles[0].plugin_names(), vec!["wasm-bar", "wasm-foo"]);
        assert_eq!(profiles[1].plugin_names(), vec!["wasm-foo"]);

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].0, "wasm-bar");
        assert_eq!(calls[0].1["guestURL"], "bar.wasm");
        assert_eq!(calls[0].2, "first");
        assert_eq!(calls[2].1["guestURL"], "other.wasm");
        assert_eq!(calls[2].2, "second");
    }

    #[test]
    fn setup_rejects_duplicate_registrations() {
        let calls: Calls = Default::default();
        let cmd = new_scheduler_command(vec![
            SchedulerOption::with_plugin("wasm-foo", recording_factory("wasm-foo", calls.clone())),
            SchedulerOption::with_plugin("wasm-foo", recording_factory("wasm-foo", calls.clone())),
        ]);

        match cmd.setup(&SchedulerSettings::default()) {
            Err(CoreError::DuplicatePlugin(name)) => assert_eq!(name, "wasm-foo"),
            Err(e) => panic!("expected DuplicatePlugin, got {e:?}"),
            Ok(_) => panic!("expected DuplicatePlugin, got Ok"),
        }
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn setup_without_config_uses_default_profile() {
        let scheduler = new_scheduler_command(Vec::new())
            .setup(&SchedulerSettings::default())
            .unwrap();
        assert_eq!(scheduler.profiles().len(), 1);
        assert_eq!(scheduler.profiles()[0].name(), "default-scheduler");
        assert!(scheduler.profiles()[0].plugins().is_empty());
    }

    #[test]
    fn setup_reports_missing_config_file() {
        let settings = SchedulerSettings {
            config: Some("/nonexistent/wasched/config.yaml".into()),
            ..Default::default()
        };
        match new_scheduler_command(Vec::new()).setup(&settings) {
            Err(CoreError::ConfigRead { path, .. }) => {
                assert!(path.ends_with("config.yaml"))
            }
            Err(e) => panic!("expected ConfigRead, got {e:?}"),
            Ok(_) => panic!("expected ConfigRead, got Ok"),
        }
    }

    #[test]
    fn setup_reports_malformed_config() {
        let f = write_config("profiles: [\n");
        match new_scheduler_command(Vec::new()).setup(&settings_for(&f)) {
            Err(CoreError::Config { .. }) => {}
            Err(e) => panic!("expected Config, got {e:?}"),
            Ok(_) => panic!("expected Config, got Ok"),
        }
    }

    #[test]
    fn setup_rejects_foreign_documents() {
        let f = write_config("apiVersion: apps/v1\nkind: Deployment\n");
        match new_scheduler_command(Vec::new()).setup(&settings_for(&f)) {
            Err(CoreError::Config { .. }) => {}
            Err(e) => panic!("expected Config, got {e:?}"),
            Ok(_) => panic!("expected Config, got Ok"),
        }
    }

    #[test]
    fn factory_error_names_the_profile() {
        let f = write_config(TWO_PROFILES);
        let failing: PluginFactory = Arc::new(
            |_: &Value, _: &BuildContext| -> Result<Arc<dyn Plugin>, PluginError> {
                Err(PluginError::Load {
                    plugin: "wasm-foo".into(),
                    reason: "boom".into(),
                })
            },
        );

        let err = match new_scheduler_command(vec![SchedulerOption::with_plugin("wasm-foo", failing)])
            .setup(&settings_for(&f))
        {
            Err(e) => e,
            Ok(_) => panic!("expected plugin error"),
        };
        assert!(matches!(err, CoreError::Plugin { ref profile, .. } if profile == "first"));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn metrics_option_reaches_factories() {
        use crate::metrics::MetricsBackend;

        #[derive(Default)]
        struct Counting {
            registered: AtomicUsize,
            instantiated: AtomicUsize,
        }

        impl MetricsBackend for Counting {
            fn record_plugin_registered(&self, _: &str) {
                self.registered.fetch_add(1, Ordering::SeqCst);
            }
            fn record_plugin_instantiated(&self, _: &str, _: std::time::Duration) {
                self.instantiated.fetch_add(1, Ordering::SeqCst);
            }
            fn record_plugin_error(&self, _: &str, _: &str) {}
        }

        let f = write_config(TWO_PROFILES);
        let metrics = Arc::new(Counting::default());
        let calls: Calls = Default::default();

        new_scheduler_command(vec![
            SchedulerOption::with_metrics(metrics.clone()),
            SchedulerOption::with_plugin("wasm-foo", recording_factory("wasm-foo", calls.clone())),
        ])
        .setup(&settings_for(&f))
        .unwrap();

        assert_eq!(metrics.registered.load(Ordering::SeqCst), 1);
        assert_eq!(metrics.instantiated.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn execute_returns_after_shutdown() {
        let f = write_config(TWO_PROFILES);
        let calls: Calls = Default::default();

        let res = new_scheduler_command(vec![SchedulerOption::with_plugin(
            "wasm-foo",
            recording_factory("wasm-foo", calls.clone()),
        )])
        .execute(&settings_for(&f), std::future::ready(()))
        .await;

        assert!(res.is_ok(), "execute failed: {res:?}");
        assert_eq!(calls.lock().unwrap().len(), 2);
    }
}
