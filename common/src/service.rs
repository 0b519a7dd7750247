use async_trait::async_trait;

use crate::error::ProbeFault;

/// The state string a provider reports for a healthy service.
pub const RUNNING: &str = "running";

/// Defines the contract for asking an OS service manager about a service.
#[async_trait]
pub trait ServiceStateProvider: Send + Sync {
    /// Retrieves the current state of `name` on `host`.
    ///
    /// # Returns
    /// * `Ok(state)` - The state as reported, e.g. `running` or `stopped`.
    /// * `Err(fault)` - The service could not be located or the host could not be reached.
    async fn get_state(&self, host: &str, name: &str) -> Result<String, ProbeFault>;
}
