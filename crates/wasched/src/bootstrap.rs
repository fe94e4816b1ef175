//! Startup sequence: discovery, registration, command execution.
use std::{future::Future, io, net::SocketAddr, process::ExitCode, sync::Arc};

use anyhow::Context;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use wasched_core::{SchedulerCommand, SchedulerOption, new_scheduler_command};
use wasched_prometheus::PrometheusMetrics;

use crate::{
    cli::Cli,
    discovery::{DiscoveryError, wasm_plugins_from_config},
    metrics,
    registration::plugin_options,
};

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("failed to get wasm plugins from config: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Execute(#[from] anyhow::Error),
}

/// Run startup with the given command builder.
///
/// The builder is called only after discovery succeeded, with every plugin option in discovery order.
pub fn bootstrap<B, F>(cli: &Cli, build: B, shutdown: F) -> Result<(), BootstrapError>
where
    B: FnOnce(Vec<SchedulerOption>) -> SchedulerCommand,
    F: Future<Output = ()>,
{
    let names = wasm_plugins_from_config(cli.scheduler.config_path())?;
    info!(plugins = ?names, "registering extension plugins");

    let mut options = plugin_options(&names);
    let metrics = match PrometheusMetrics::new(env!("CARGO_PKG_VERSION")) {
        Ok(metrics) => {
            options.push(SchedulerOption::with_metrics(Arc::new(metrics.clone())));
            Some(metrics)
        }
        Err(e) => {
            warn!(error = %e, "prometheus metrics disabled");
            None
        }
    };

    let command = build(options);
    execute(command, cli, metrics, shutdown)?;
    Ok(())
}

fn execute<F>(
    command: SchedulerCommand,
    cli: &Cli,
    metrics: Option<PrometheusMetrics>,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build scheduler runtime")?;

    let settings = cli.scheduler.settings();
    runtime.block_on(async {
        match (cli.scheduler.metrics_bind_address, metrics) {
            (Some(addr), Some(metrics)) => spawn_metrics_server(addr, metrics).await?,
            (Some(addr), None) => warn!(%addr, "metrics endpoint not started, backend unavailable"),
            (None, _) => {}
        }

        command
            .execute(&settings, shutdown)
            .await
            .context("scheduler command failed")
    })
}

/// Bind `addr` and serve `/metrics` in the background of the current runtime.
async fn spawn_metrics_server(addr: SocketAddr, metrics: PrometheusMetrics) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind metrics endpoint {addr}"))?;
    info!(addr = %listener.local_addr().unwrap_or(addr), "serving metrics");

    tokio::spawn(async move {
        if let Err(e) = metrics::serve(listener, metrics).await {
            error!(error = %e, "metrics endpoint stopped");
        }
    });
    Ok(())
}

/// Resolve once `signal` fires.
///
/// A listener that could not be installed is logged and never resolves, so the scheduler keeps running.
pub async fn wait_for_signal<S>(signal: S)
where
    S: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            error!(error = %e, "failed to listen for shutdown signal, running until killed");
            std::future::pending::<()>().await;
        }
    }
}

/// Outermost step: report any startup error on stderr and map it to the exit status.
pub fn run<F>(cli: &Cli, shutdown: F) -> ExitCode
where
    F: Future<Output = ()>,
{
    match bootstrap(cli, new_scheduler_command, shutdown) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
