use async_trait::async_trait;
use sysinfo::{System, SystemExt};

use pulsr_common::error::ProbeFault;
use pulsr_common::service::{RUNNING, ServiceStateProvider};

use super::is_local_host;

/// Treats a service as running when a process with exactly that name exists.
///
/// Only the local machine can be inspected.
pub struct ProcessTableProvider;

#[async_trait]
impl ServiceStateProvider for ProcessTableProvider {
    async fn get_state(&self, host: &str, name: &str) -> Result<String, ProbeFault> {
        if !is_local_host(host) {
            return Err(ProbeFault::HostUnavailable {
                host: host.to_string(),
                reason: String::from("the process table can only be read on this machine"),
            });
        }

        let process_name: String = name.trim().to_string();
        let running: bool = tokio::task::spawn_blocking(move || {
            let mut sys = System::new();
            sys.refresh_processes();
            let found: bool = sys.processes_by_exact_name(&process_name).next().is_some();
            found
        })
        .await
        .map_err(|e| ProbeFault::Request(format!("process scan failed: {e}")))?;

        let state: &str = if running { RUNNING } else { "stopped" };
        Ok(state.to_string())
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
