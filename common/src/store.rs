use crate::target::TargetRegistry;

/// Loads and saves the target registry.
pub trait RegistryStore: Send + Sync {
    /// Returns the stored registry.
    ///
    /// Never fails: a missing or unreadable store yields an empty registry.
    fn load(&self) -> TargetRegistry;

    fn save(&self, registry: &TargetRegistry) -> anyhow::Result<()>;
}
