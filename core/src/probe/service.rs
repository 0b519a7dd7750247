use std::sync::Arc;

use async_trait::async_trait;

use pulsr_common::probe::ServiceProbe;
use pulsr_common::service::{RUNNING, ServiceStateProvider};
use pulsr_common::verdict::Assessment;

/// Classifies the state reported by a [`ServiceStateProvider`].
///
/// Only `running` is healthy. Any other reported state (`stopped`, `paused`, ...) is a
/// definite negative answer and therefore unhealthy; provider faults are errors.
pub struct ServiceStateProbe {
    provider: Arc<dyn ServiceStateProvider>,
}

impl ServiceStateProbe {
    pub fn new(provider: Arc<dyn ServiceStateProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl ServiceProbe for ServiceStateProbe {
    async fn check_service(&self, host: &str, service: &str) -> Assessment {
        match self.provider.get_state(host, service).await {
            Ok(state) if state.eq_ignore_ascii_case(RUNNING) => Assessment::healthy(state),
            Ok(state) if state.trim().is_empty() => Assessment::unhealthy("unknown"),
            Ok(state) => Assessment::unhealthy(state),
            Err(fault) => Assessment::errored(fault.to_string()),
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
