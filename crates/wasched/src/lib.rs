//! Scheduler entry point with configuration-driven extension plugins.
//!
//! Startup reads `--config`, collects the names of `pluginConfig` entries that carry a
//! `guestURL`, registers one wasm plugin factory per name and runs the scheduler command.
pub mod bootstrap;
pub mod cli;
pub mod discovery;
pub mod metrics;
pub mod registration;
