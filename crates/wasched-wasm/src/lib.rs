//! Extension plugins backed by a WebAssembly guest.
//!
//! [`plugin_factory`] binds a name to a deferred constructor. Nothing is read until the
//! scheduler invokes the factory with the profile's `guestURL` / `guestConfig` args.
mod args;
pub use args::WasmPluginArgs;

mod error;
pub use error::WasmError;

mod guest;
pub use guest::GuestSource;

mod plugin;
pub use plugin::WasmPlugin;

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use wasched_core::{BuildContext, Plugin, PluginError, PluginFactory};

/// Factory constructing a [`WasmPlugin`] bound to `name`.
///
/// Creating the factory performs no I/O.
pub fn plugin_factory(name: impl Into<String>) -> PluginFactory {
    let name: String = name.into();
    Arc::new(
        move |args: &Value, ctx: &BuildContext| -> Result<Arc<dyn Plugin>, PluginError> {
            let plugin = build_plugin(&name, args).map_err(|e| e.into_plugin_error(&name))?;
            debug!(
                plugin = %name,
                profile = ctx.profile(),
                guest_url = plugin.guest_url(),
                guest_bytes = plugin.guest_len(),
                "wasm plugin created"
            );
            Ok(Arc::new(plugin))
        },
    )
}

fn build_plugin(name: &str, args: &Value) -> Result<WasmPlugin, WasmError> {
    let args = WasmPluginArgs::from_value(args)?;
    let source = GuestSource::parse(&args.guest_url)?;
    let guest = source.load()?;
    Ok(WasmPlugin::new(name, args, guest))
}
