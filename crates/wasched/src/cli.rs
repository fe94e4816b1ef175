use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use clap::{ArgAction, Args, CommandFactory, Parser};

use wasched_core::SchedulerSettings;
use wasched_observe::{LoggerConfig, LoggerFormat, LoggerLevel};

/// Root command: scheduler flags merged with global flags.
#[derive(Parser, Debug, Clone)]
#[command(name = "wasched")]
#[command(version, about = "Workload scheduler with WebAssembly extension plugins")]
pub struct Cli {
    #[command(flatten)]
    pub scheduler: SchedulerFlags,

    #[command(flatten)]
    pub global: GlobalFlags,
}

#[derive(Args, Debug, Clone, Default)]
#[command(next_help_heading = "Scheduler flags")]
pub struct SchedulerFlags {
    /// The path to the scheduler configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to kubeconfig file with authorization and master location information
    #[arg(long, value_name = "FILE")]
    pub kubeconfig: Option<PathBuf>,

    /// The address of the API server (overrides any value in kubeconfig)
    #[arg(long, value_name = "URL")]
    pub master: Option<String>,

    /// Start a leader election client and gain leadership before running the scheduler loop
    #[arg(long, default_value_t = true, action = ArgAction::Set, value_name = "BOOL")]
    pub leader_elect: bool,

    /// Address to serve Prometheus metrics on at /metrics; disabled when unset
    #[arg(long, value_name = "ADDR")]
    pub metrics_bind_address: Option<SocketAddr>,
}

impl SchedulerFlags {
    /// Configuration path; empty when `--config` was not given.
    pub fn config_path(&self) -> &Path {
        self.config.as_deref().unwrap_or(Path::new(""))
    }

    pub fn settings(&self) -> SchedulerSettings {
        SchedulerSettings {
            config: self.config.clone(),
            kubeconfig: self.kubeconfig.clone(),
            master: self.master.clone(),
            leader_elect: self.leader_elect,
        }
    }
}

#[derive(Args, Debug, Clone)]
#[command(next_help_heading = "Global flags")]
pub struct GlobalFlags {
    /// Log output format: text, json or journald
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub logging_format: LoggerFormat,

    /// Number for the log level verbosity
    #[arg(short = 'v', long = "v", default_value_t = 0, value_name = "LEVEL")]
    pub verbosity: u8,

    /// Log filter expression; overrides -v (e.g. "wasched_core=debug,info")
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<LoggerLevel>,
}

impl GlobalFlags {
    pub fn logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            format: self.logging_format,
            level: self
                .log_level
                .clone()
                .unwrap_or_else(|| LoggerLevel::from_verbosity(self.verbosity)),
            ..Default::default()
        }
    }
}

/// Fixed flag surface of the process.
///
/// Called once in `main` before any argument is parsed.
pub fn build_command() -> clap::Command {
    Cli::command()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        build_command().debug_assert();
    }

    #[test]
    fn defaults_without_flags() {
        let cli = Cli::try_parse_from(["wasched"]).unwrap();
        assert_eq!(cli.scheduler.config_path(), Path::new(""));
        assert!(cli.scheduler.leader_elect);
        assert!(cli.scheduler.metrics_bind_address.is_none());

        let logger = cli.global.logger_config();
        assert_eq!(logger.format, LoggerFormat::Text);
        assert_eq!(logger.level.as_str(), "info");
    }

    #[test]
    fn parses_scheduler_and_global_flags() {
        let cli = Cli::try_parse_from([
            "wasched",
            "--config",
            "/etc/wasched/config.yaml",
            "--master",
            "https://127.0.0.1:6443",
            "--leader-elect",
            "false",
            "--metrics-bind-address",
            "127.0.0.1:10259",
            "--logging-format",
            "json",
            "-v",
            "4",
        ])
        .unwrap();

        let settings = cli.scheduler.settings();
        assert_eq!(settings.config, Some(PathBuf::from("/etc/wasched/config.yaml")));
        assert_eq!(settings.master.as_deref(), Some("https://127.0.0.1:6443"));
        assert!(!settings.leader_elect);
        assert_eq!(
            cli.scheduler.metrics_bind_address,
            Some("127.0.0.1:10259".parse().unwrap())
        );

        let logger = cli.global.logger_config();
        assert_eq!(logger.format, LoggerFormat::Json);
        assert_eq!(logger.level.as_str(), "trace");
    }

    #[test]
    fn log_level_overrides_verbosity() {
        let cli =
            Cli::try_parse_from(["wasched", "--v", "2", "--log-level", "wasched=trace,warn"])
                .unwrap();
        assert_eq!(cli.global.logger_config().level.as_str(), "wasched=trace,warn");
    }

    #[test]
    fn rejects_invalid_global_values() {
        assert!(Cli::try_parse_from(["wasched", "--logging-format", "xml"]).is_err());
        assert!(Cli::try_parse_from(["wasched", "--log-level", "x=loud"]).is_err());
        assert!(Cli::try_parse_from(["wasched", "--metrics-bind-address", "localhost"]).is_err());
    }
}
