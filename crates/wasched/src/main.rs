use std::process::ExitCode;

use clap::FromArgMatches;
use tracing::info;

use wasched::{
    bootstrap,
    cli::{Cli, build_command},
};
use wasched_observe::init_logger;

fn main() -> ExitCode {
    // 1) flags
    let matches = build_command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    // 2) logger
    if let Err(e) = init_logger(&cli.global.logger_config()) {
        eprintln!("failed to initialize logger: {e}");
        return ExitCode::FAILURE;
    }
    info!(version = env!("CARGO_PKG_VERSION"), "wasched starting");

    // 3) discovery, registration, scheduler
    bootstrap::run(&cli, bootstrap::wait_for_signal(tokio::signal::ctrl_c()))
}
