use thiserror::Error;

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("invalid arguments for plugin '{plugin}': {reason}")]
    InvalidArgs { plugin: String, reason: String },

    #[error("failed to load plugin '{plugin}': {reason}")]
    Load { plugin: String, reason: String },

    #[error("plugin '{plugin}' is not supported: {reason}")]
    Unsupported { plugin: String, reason: String },
}

impl PluginError {
    /// Bounded label value for metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            PluginError::InvalidArgs { .. } => "invalid_args",
            PluginError::Load { .. } => "load_failed",
            PluginError::Unsupported { .. } => "unsupported",
        }
    }
}
