use serde::{Deserialize, Serialize};
use serde_json::Value;
use wasched_model::GUEST_URL_ARG;

use crate::error::WasmError;

/// `pluginConfig` args of an extension plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasmPluginArgs {
    /// Location of the guest module: `file://<path>` or a bare path.
    #[serde(rename = "guestURL")]
    pub guest_url: String,

    /// Opaque configuration passed through to the guest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_config: Option<String>,
}

impl WasmPluginArgs {
    pub fn from_value(args: &Value) -> Result<Self, WasmError> {
        if args.get(GUEST_URL_ARG).is_none() {
            return Err(WasmError::MissingGuestUrl);
        }
        let parsed: Self = serde_json::from_value(args.clone())?;
        if parsed.guest_url.is_empty() {
            return Err(WasmError::MissingGuestUrl);
        }
        Ok(parsed)
    }
}
