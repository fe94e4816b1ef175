//! One scheduler option per discovered extension plugin.
use wasched_core::SchedulerOption;
use wasched_wasm::plugin_factory;

/// Bind each name to a wasm plugin factory, keeping order and repeats.
///
/// Factories are not invoked here.
pub fn plugin_options<S: AsRef<str>>(names: &[S]) -> Vec<SchedulerOption> {
    names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            SchedulerOption::with_plugin(name, plugin_factory(name))
        })
        .collect()
}
