//! [`ServiceStateProvider`] implementations.
//!
//! * [`systemd::SystemdProvider`]: asks `systemctl`, locally or on a remote host.
//! * [`process::ProcessTableProvider`]: looks for a process of that name on this machine.

pub mod process;
pub mod systemd;

use std::sync::Arc;

use pulsr_common::config::ServiceBackend;
use pulsr_common::service::ServiceStateProvider;
use sysinfo::{System, SystemExt};
use tracing::debug;

pub use process::ProcessTableProvider;
pub use systemd::SystemdProvider;

pub fn from_config(backend: ServiceBackend) -> Arc<dyn ServiceStateProvider> {
    let use_systemd: bool = match backend {
        ServiceBackend::Systemd => true,
        ServiceBackend::Process => false,
        ServiceBackend::Auto => systemctl_available(),
    };

    if use_systemd {
        debug!("service checks use systemctl");
        Arc::new(SystemdProvider::default())
    } else {
        debug!("service checks use the local process table");
        Arc::new(ProcessTableProvider)
    }
}

fn systemctl_available() -> bool {
    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("systemctl")
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }
    #[cfg(not(target_os = "linux"))]
    {
        false
    }
}

/// Whether `host` designates this machine.
pub fn is_local_host(host: &str) -> bool {
    let host: String = host.trim().to_ascii_lowercase();
    if matches!(host.as_str(), "" | "." | "localhost" | "127.0.0.1" | "::1") {
        return true;
    }

    System::new()
        .host_name()
        .is_some_and(|name| name.eq_ignore_ascii_case(&host))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
