use std::path::PathBuf;

use thiserror::Error;
use wasched_core::PluginError;

#[derive(Debug, Error)]
pub enum WasmError {
    #[error("invalid plugin args: {0}")]
    InvalidArgs(#[from] serde_json::Error),

    #[error("guestURL is required")]
    MissingGuestUrl,

    #[error("unsupported guestURL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("failed to read guest {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid guest module: {0}")]
    InvalidModule(String),
}

impl WasmError {
    /// Convert into the core error, attributing it to `plugin`.
    pub fn into_plugin_error(self, plugin: &str) -> PluginError {
        let plugin = plugin.to_string();
        let reason = self.to_string();
        match self {
            WasmError::InvalidArgs(_) | WasmError::MissingGuestUrl => {
                PluginError::InvalidArgs { plugin, reason }
            }
            WasmError::UnsupportedScheme(_) => PluginError::Unsupported { plugin, reason },
            WasmError::Io { .. } | WasmError::InvalidModule(_) => {
                PluginError::Load { plugin, reason }
            }
        }
    }
}
