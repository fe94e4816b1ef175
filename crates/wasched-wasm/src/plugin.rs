use std::fmt;

use wasched_core::Plugin;

use crate::args::WasmPluginArgs;

/// Extension plugin bound to one name and one guest module.
pub struct WasmPlugin {
    name: String,
    args: WasmPluginArgs,
    guest: Vec<u8>,
}

impl WasmPlugin {
    pub fn new(name: impl Into<String>, args: WasmPluginArgs, guest: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            args,
            guest,
        }
    }

    pub fn guest_url(&self) -> &str {
        &self.args.guest_url
    }

    pub fn guest_config(&self) -> Option<&str> {
        self.args.guest_config.as_deref()
    }

    /// Guest module bytes.
    pub fn guest(&self) -> &[u8] {
        &self.guest
    }

    pub fn guest_len(&self) -> usize {
        self.guest.len()
    }
}

impl Plugin for WasmPlugin {
    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for WasmPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WasmPlugin")
            .field("name", &self.name)
            .field("guest_url", &self.args.guest_url)
            .field("guest_len", &self.guest.len())
            .finish()
    }
}
