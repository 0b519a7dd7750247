use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_REGISTRY_FILE: &str = "monitorlist.json";
pub const DEFAULT_LOG_FILE: &str = "monitor.log";
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(60_000);
pub const DEFAULT_WEBSITE_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_HOST_TIMEOUT: Duration = Duration::from_millis(2_000);
pub const DEFAULT_CHECK_DEADLINE: Duration = Duration::from_secs(30);
pub const DEFAULT_CONCURRENCY: usize = 16;

pub struct Config {
    /// Where the target list is loaded from and saved to.
    pub registry_path: PathBuf,

    /// Append-only log written by background mode.
    pub log_path: PathBuf,

    /// Time between two background cycles.
    pub interval: Duration,

    pub website_timeout: Duration,
    pub host_timeout: Duration,

    /// Upper bound on a single check, whatever the probe does internally.
    pub check_deadline: Duration,

    /// Maximum number of checks in flight within one cycle.
    pub concurrency: usize,

    pub host_strategy: HostStrategy,
    pub service_backend: ServiceBackend,

    /// External program receiving `<title> <message>` for every alert.
    ///
    /// When unset, alerts are emitted as `warn` events only.
    pub alert_command: Option<String>,

    pub no_banner: bool,
    pub quiet: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry_path: PathBuf::from(DEFAULT_REGISTRY_FILE),
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
            interval: DEFAULT_INTERVAL,
            website_timeout: DEFAULT_WEBSITE_TIMEOUT,
            host_timeout: DEFAULT_HOST_TIMEOUT,
            check_deadline: DEFAULT_CHECK_DEADLINE,
            concurrency: DEFAULT_CONCURRENCY,
            host_strategy: HostStrategy::Icmp,
            service_backend: ServiceBackend::Auto,
            alert_command: None,
            no_banner: false,
            quiet: 0,
        }
    }
}

/// How hosts are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// ICMP when running as root, TCP otherwise.
    Auto,
    /// ICMP echo over a raw socket. Without the privilege for one, host checks are errors.
    Icmp,
    /// TCP handshake against a few common ports.
    Tcp,
}

impl FromStr for HostStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(HostStrategy::Auto),
            "icmp" | "ping" => Ok(HostStrategy::Icmp),
            "tcp" => Ok(HostStrategy::Tcp),
            _ => Err(format!("invalid host probe: {s} (expected auto, icmp or tcp)")),
        }
    }
}

/// Which service manager answers service checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceBackend {
    /// systemd when `systemctl` is available, the process table otherwise.
    Auto,
    Systemd,
    Process,
}

impl FromStr for ServiceBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(ServiceBackend::Auto),
            "systemd" | "systemctl" => Ok(ServiceBackend::Systemd),
            "process" | "proc" => Ok(ServiceBackend::Process),
            _ => Err(format!(
                "invalid service backend: {s} (expected auto, systemd or process)"
            )),
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
