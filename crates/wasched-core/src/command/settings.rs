use std::path::PathBuf;

/// Process-level scheduler settings, taken from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchedulerSettings {
    /// Scheduler configuration file. `None` runs a single default profile.
    pub config: Option<PathBuf>,
    /// Kubeconfig with authorization and control plane location.
    pub kubeconfig: Option<PathBuf>,
    /// Address of the API server; overrides the kubeconfig.
    pub master: Option<String>,
    /// Start a leader election client before running the scheduler loop.
    pub leader_elect: bool,
}
