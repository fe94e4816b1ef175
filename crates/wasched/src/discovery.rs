//! Extension plugin discovery.
//!
//! An extension plugin is a `pluginConfig` entry whose args carry a non-empty `guestURL`.
use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::debug;

use wasched_model::{ModelError, SchedulerConfiguration};

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("config file is not specified")]
    ConfigNotSpecified,

    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ModelError,
    },

    #[error("config file {} has an unexpected schema: {source}", path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: ModelError,
    },
}

/// Names of the extension plugins requested by the configuration at `path`.
///
/// Names come back in profile order, then `pluginConfig` order, verbatim and with repeats.
/// A configuration without extension plugins yields an empty list.
pub fn wasm_plugins_from_config(path: &Path) -> Result<Vec<String>, DiscoveryError> {
    if path.as_os_str().is_empty() {
        return Err(DiscoveryError::ConfigNotSpecified);
    }

    let raw = fs::read_to_string(path).map_err(|source| DiscoveryError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let cfg = SchedulerConfiguration::from_yaml_str(&raw).map_err(|source| match source {
        ModelError::SchemaMismatch { .. } | ModelError::EmptyDocument => DiscoveryError::Schema {
            path: path.to_path_buf(),
            source,
        },
        _ => DiscoveryError::Parse {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let names = wasm_plugins(&cfg);
    debug!(config = %path.display(), plugins = ?names, "extension plugins discovered");
    Ok(names)
}

/// Extension plugin names of an already parsed configuration.
pub fn wasm_plugins(cfg: &SchedulerConfiguration) -> Vec<String> {
    cfg.profiles
        .iter()
        .flat_map(|profile| profile.plugin_config.iter())
        .filter(|pc| pc.guest_url().is_some())
        .map(|pc| pc.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    const HEADER: &str = "apiVersion: kubescheduler.config.k8s.io/v1\nkind: KubeSchedulerConfiguration\n";

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(body.as_bytes()).unwrap();
        f
    }

    #[test]
    fn returns_names_in_config_order() {
        let f = write_config(
            r#"
apiVersion: kubescheduler.config.k8s.io/v1
kind: KubeSchedulerConfiguration
profiles:
  - schedulerName: default-scheduler
    pluginConfig:
      - name: wasm-foo
        args:
          guestURL: file:///opt/foo.wasm
      - name: NodeResourcesFit
        args:
          scoringStrategy:
            type: MostAllocated
      - name: wasm-bar
        args:
          guestURL: bar.wasm
          guestConfig: "{}"
"#,
        );

        let names = wasm_plugins_from_config(f.path()).unwrap();
        assert_eq!(names, vec!["wasm-foo", "wasm-bar"]);
    }

    #[test]
    fn walks_profiles_in_order_and_keeps_repeats() {
        let f = write_config(
            r#"
apiVersion: kubescheduler.config.k8s.io/v1
kind: KubeSchedulerConfiguration
profiles:
  - schedulerName: a
    pluginConfig:
      - name: z-plugin
        args: { guestURL: z.wasm }
  - schedulerName: b
    pluginConfig:
      - name: a-plugin
        args: { guestURL: a.wasm }
      - name: z-plugin
        args: { guestURL: z.wasm }
"#,
        );

        let names = wasm_plugins_from_config(f.path()).unwrap();
        assert_eq!(names, vec!["z-plugin", "a-plugin", "z-plugin"]);
    }

    #[test]
    fn config_without_extensions_yields_empty_list() {
        let f = write_config(&format!("{HEADER}profiles:\n  - schedulerName: x\n"));
        assert!(wasm_plugins_from_config(f.path()).unwrap().is_empty());
    }

    #[test]
    fn empty_path_is_an_error() {
        assert!(matches!(
            wasm_plugins_from_config(Path::new("")),
            Err(DiscoveryError::ConfigNotSpecified)
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        let res = wasm_plugins_from_config(Path::new("/nonexistent/wasched.yaml"));
        assert!(matches!(res, Err(DiscoveryError::Read { .. })));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let f = write_config(&format!("{HEADER}profiles:\n  - pluginConfig: [ {{name: x\n"));
        let res = wasm_plugins_from_config(f.path());
        assert!(matches!(res, Err(DiscoveryError::Parse { .. })), "got {res:?}");
    }

    #[test]
    fn wrong_shape_is_an_error() {
        let f = write_config(&format!("{HEADER}profiles:\n  pluginConfig: 3\n"));
        let res = wasm_plugins_from_config(f.path());
        assert!(matches!(res, Err(DiscoveryError::Parse { .. })), "got {res:?}");
    }

    #[test]
    fn wrong_kind_is_an_error() {
        let f = write_config("kind: Deployment\nprofiles: []\n");
        let res = wasm_plugins_from_config(f.path());
        assert!(matches!(res, Err(DiscoveryError::Schema { .. })), "got {res:?}");
    }

    #[test]
    fn files_that_are_not_scheduler_configurations_are_errors() {
        for body in [
            "",
            "# just a comment\n",
            "foo: bar\n",
            "{}\n",
            "apiVersion: apps/v1\nspec: {}\n",
            "kind: KubeSchedulerConfiguration\nprofiles: []\n",
        ] {
            let f = write_config(body);
            let res = wasm_plugins_from_config(f.path());
            assert!(
                matches!(res, Err(DiscoveryError::Schema { .. })),
                "expected Schema error for {body:?}, got {res:?}"
            );
        }
    }
}
