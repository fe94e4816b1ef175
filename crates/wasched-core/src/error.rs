use std::path::PathBuf;

use thiserror::Error;
use wasched_model::ModelError;

use crate::plugin::PluginError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("a plugin named {0} already exists")]
    DuplicatePlugin(String),

    #[error("failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: ModelError,
    },

    #[error("initializing plugins for profile {profile}: {source}")]
    Plugin {
        profile: String,
        #[source]
        source: PluginError,
    },
}
