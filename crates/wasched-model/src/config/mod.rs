//! Scheduler configuration document.
//!
//! Only the parts the bootstrap path reads are typed; everything else in the document is ignored.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ModelError, ModelResult};

/// Expected value of the top-level `kind` field.
pub const CONFIG_KIND: &str = "KubeSchedulerConfiguration";

/// Expected value of the top-level `apiVersion` field.
pub const CONFIG_API_VERSION: &str = "kubescheduler.config.k8s.io/v1";

/// Name of the profile used when no configuration file is given.
pub const DEFAULT_SCHEDULER_NAME: &str = "default-scheduler";

/// Plugin argument that marks a `pluginConfig` entry as an extension (guest) plugin.
pub const GUEST_URL_ARG: &str = "guestURL";

/// Top-level scheduler configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub profiles: Vec<Profile>,
}

impl Default for SchedulerConfiguration {
    fn default() -> Self {
        Self {
            api_version: Some(CONFIG_API_VERSION.to_string()),
            kind: Some(CONFIG_KIND.to_string()),
            profiles: vec![Profile::default()],
        }
    }
}

impl SchedulerConfiguration {
    /// Parse a YAML (or JSON) document and check its `apiVersion` and `kind`.
    ///
    /// A document with nothing but blank lines and comments is rejected.
    pub fn from_yaml_str(s: &str) -> ModelResult<Self> {
        let blank = s.lines().map(str::trim).all(|l| l.is_empty() || l.starts_with('#'));
        if blank {
            return Err(ModelError::EmptyDocument);
        }

        let cfg: Self = serde_yaml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject documents of another `kind` or `apiVersion`, including ones that omit either.
    pub fn validate(&self) -> ModelResult<()> {
        check_field("kind", CONFIG_KIND, self.kind.as_deref())?;
        check_field("apiVersion", CONFIG_API_VERSION, self.api_version.as_deref())
    }
}

fn check_field(field: &'static str, expected: &'static str, actual: Option<&str>) -> ModelResult<()> {
    match actual {
        Some(v) if v == expected => Ok(()),
        other => Err(ModelError::SchemaMismatch {
            field,
            expected,
            actual: other.map(str::to_string),
        }),
    }
}

/// One scheduling profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default = "default_scheduler_name")]
    pub scheduler_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Plugins>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugin_config: Vec<PluginConfig>,
}

fn default_scheduler_name() -> String {
    DEFAULT_SCHEDULER_NAME.to_string()
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            scheduler_name: default_scheduler_name(),
            plugins: None,
            plugin_config: Vec::new(),
        }
    }
}

impl Profile {
    /// Arguments configured for `name`, if the profile has a `pluginConfig` entry for it.
    ///
    /// The first matching entry wins.
    pub fn plugin_args(&self, name: &str) -> Option<&Value> {
        self.plugin_config
            .iter()
            .find(|pc| pc.name == name)
            .map(|pc| &pc.args)
    }

    /// Every plugin name the profile mentions, in first-seen order, without repeats.
    ///
    /// Enabled plugins across extension points come first, then `pluginConfig` entries.
    pub fn referenced_plugins(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        let enabled = self
            .plugins
            .iter()
            .flat_map(|p| p.sets())
            .flat_map(|set| set.enabled.iter().map(|r| r.name.as_str()));
        let configured = self.plugin_config.iter().map(|pc| pc.name.as_str());

        for name in enabled.chain(configured) {
            if !out.contains(&name) {
                out.push(name);
            }
        }
        out
    }
}

/// Per-extension-point plugin sets.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Plugins {
    pub multi_point: PluginSet,
    pub pre_enqueue: PluginSet,
    pub queue_sort: PluginSet,
    pub pre_filter: PluginSet,
    pub filter: PluginSet,
    pub post_filter: PluginSet,
    pub pre_score: PluginSet,
    pub score: PluginSet,
    pub reserve: PluginSet,
    pub permit: PluginSet,
    pub pre_bind: PluginSet,
    pub bind: PluginSet,
    pub post_bind: PluginSet,
}

impl Plugins {
    /// All extension points, `multiPoint` first.
    pub fn sets(&self) -> [&PluginSet; 13] {
        [
            &self.multi_point,
            &self.pre_enqueue,
            &self.queue_sort,
            &self.pre_filter,
            &self.filter,
            &self.post_filter,
            &self.pre_score,
            &self.score,
            &self.reserve,
            &self.permit,
            &self.pre_bind,
            &self.bind,
            &self.post_bind,
        ]
    }
}

/// Enabled and disabled plugins of one extension point.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginSet {
    pub enabled: Vec<PluginRef>,
    pub disabled: Vec<PluginRef>,
}

/// Reference to a plugin by name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
}

/// Arguments for one plugin; opaque at this layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PluginConfig {
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

impl PluginConfig {
    /// Non-empty `guestURL` argument, present only on extension plugins.
    pub fn guest_url(&self) -> Option<&str> {
        self.args
            .get(GUEST_URL_ARG)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}
