use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, warn};

use pulsr_common::error::PersistenceFault;
use pulsr_common::store::RegistryStore;
use pulsr_common::target::TargetRegistry;

/// Keeps the registry in an indented JSON file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file, surfacing what went wrong.
    pub fn read(&self) -> Result<TargetRegistry, PersistenceFault> {
        let json: String = fs::read_to_string(&self.path)?;
        let registry: TargetRegistry = serde_json::from_str(&json)?;
        Ok(registry)
    }
}

impl RegistryStore for JsonFileStore {
    fn load(&self) -> TargetRegistry {
        match self.read() {
            Ok(registry) => registry,
            Err(PersistenceFault::Io(e)) if e.kind() == ErrorKind::NotFound => {
                debug!("{} does not exist yet, starting empty", self.path.display());
                TargetRegistry::new()
            }
            Err(e) => {
                warn!("{}: {e}; starting with an empty list", self.path.display());
                TargetRegistry::new()
            }
        }
    }

    fn save(&self, registry: &TargetRegistry) -> anyhow::Result<()> {
        let json: String =
            serde_json::to_string_pretty(registry).context("serializing target list")?;
        fs::write(&self.path, json)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
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
