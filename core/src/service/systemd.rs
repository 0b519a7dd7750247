use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;

use pulsr_common::error::ProbeFault;
use pulsr_common::service::{RUNNING, ServiceStateProvider};

use super::is_local_host;

const SYSTEMCTL: &str = "systemctl";
const SYSTEMCTL_TIMEOUT: Duration = Duration::from_secs(10);

pub struct SystemdProvider {
    command_timeout: Duration,
}

impl Default for SystemdProvider {
    fn default() -> Self {
        Self::new(SYSTEMCTL_TIMEOUT)
    }
}

impl SystemdProvider {
    pub fn new(command_timeout: Duration) -> Self {
        Self { command_timeout }
    }
}

#[async_trait]
impl ServiceStateProvider for SystemdProvider {
    async fn get_state(&self, host: &str, name: &str) -> Result<String, ProbeFault> {
        let remote: bool = !is_local_host(host);

        let mut command = Command::new(SYSTEMCTL);
        command
            .arg("show")
            .arg(unit_name(name))
            .arg("--property=LoadState,ActiveState,SubState")
            .kill_on_drop(true);
        if remote {
            command.arg("--host").arg(host.trim());
        }

        let output = match timeout(self.command_timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(ProbeFault::Command {
                    command: SYSTEMCTL.to_string(),
                    reason: e.to_string(),
                });
            }
            Err(_elapsed) => return Err(ProbeFault::Timeout(self.command_timeout)),
        };

        if !output.status.success() {
            let reason: String = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let reason: String = if reason.is_empty() {
                format!("exited with {}", output.status)
            } else {
                reason
            };
            return Err(if remote {
                ProbeFault::HostUnavailable {
                    host: host.to_string(),
                    reason,
                }
            } else {
                ProbeFault::Command {
                    command: SYSTEMCTL.to_string(),
                    reason,
                }
            });
        }

        parse_show_output(host, name, &String::from_utf8_lossy(&output.stdout))
    }
}

/// `nginx` becomes `nginx.service`; explicit unit names are left alone.
fn unit_name(name: &str) -> String {
    let name: &str = name.trim();
    if name.contains('.') {
        name.to_string()
    } else {
        format!("{name}.service")
    }
}

fn parse_show_output(host: &str, name: &str, stdout: &str) -> Result<String, ProbeFault> {
    let properties: HashMap<&str, &str> = stdout
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim()))
        .collect();

    if properties.get("LoadState") == Some(&"not-found") {
        return Err(ProbeFault::ServiceNotFound {
            host: host.to_string(),
            name: name.to_string(),
        });
    }

    let sub_state: &str = properties
        .get("SubState")
        .copied()
        .filter(|state| !state.is_empty())
        .or_else(|| properties.get("ActiveState").copied())
        .ok_or_else(|| ProbeFault::Command {
            command: SYSTEMCTL.to_string(),
            reason: format!("no state reported for {}", unit_name(name)),
        })?;

    let state: &str = match sub_state {
        "running" => RUNNING,
        "dead" => "stopped",
        other => other,
    };
    Ok(state.to_string())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
