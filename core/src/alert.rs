//! [`Alerter`] implementations.

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use pulsr_common::alert::Alerter;
use pulsr_common::config::Config;
use pulsr_common::error::AlertDeliveryFault;

const ALERT_COMMAND_TIMEOUT: Duration = Duration::from_secs(5);

pub fn from_config(cfg: &Config) -> Arc<dyn Alerter> {
    match cfg.alert_command.as_deref().map(CommandAlerter::parse) {
        Some(Ok(alerter)) => Arc::new(alerter),
        Some(Err(e)) => {
            warn!("ignoring alert command: {e}");
            Arc::new(LogAlerter)
        }
        None => Arc::new(LogAlerter),
    }
}

/// Emits alerts as `warn` events.
pub struct LogAlerter;

#[async_trait]
impl Alerter for LogAlerter {
    async fn notify(&self, title: &str, message: &str) {
        warn!("{title}: {message}");
    }
}

/// Runs an external program with the title and message appended as its last two
/// arguments, e.g. `notify-send -u critical <title> <message>`.
pub struct CommandAlerter {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandAlerter {
    /// Splits a command line on whitespace into a program and its arguments.
    pub fn parse(command_line: &str) -> Result<Self, AlertDeliveryFault> {
        let mut words = command_line.split_whitespace().map(str::to_string);
        let program: String = words.next().ok_or(AlertDeliveryFault::EmptyCommand)?;
        Ok(Self {
            program,
            args: words.collect(),
            timeout: ALERT_COMMAND_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn deliver(&self, title: &str, message: &str) -> Result<(), AlertDeliveryFault> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(title)
            .arg(message)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let status = match timeout(self.timeout, command.status()).await {
            Ok(Ok(status)) => status,
            Ok(Err(source)) => {
                return Err(AlertDeliveryFault::Spawn {
                    program: self.program.clone(),
                    source,
                });
            }
            Err(_elapsed) => {
                return Err(AlertDeliveryFault::Timeout {
                    program: self.program.clone(),
                    timeout: self.timeout,
                });
            }
        };

        if !status.success() {
            return Err(AlertDeliveryFault::Status {
                program: self.program.clone(),
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Alerter for CommandAlerter {
    async fn notify(&self, title: &str, message: &str) {
        if let Err(e) = self.deliver(title, message).await {
            debug!("alert not delivered: {e}");
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
