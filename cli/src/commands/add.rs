use colored::*;

use pulsr_common::config::Config;
use pulsr_common::store::RegistryStore;
use pulsr_common::target::TargetRegistry;
use pulsr_core::registry::JsonFileStore;
use tracing::warn;

use crate::terminal::{colors, print};

/// A new entry for the target list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Addition {
    Website(String),
    Host(String),
    Service { host: String, name: String },
}

impl Addition {
    fn is_blank(&self) -> bool {
        match self {
            Addition::Website(url) => url.trim().is_empty(),
            Addition::Host(address) => address.trim().is_empty(),
            Addition::Service { host, name } => host.trim().is_empty() || name.trim().is_empty(),
        }
    }

    fn describe(&self) -> String {
        match self {
            Addition::Website(url) => format!("website {}", url.trim()),
            Addition::Host(address) => format!("host {}", address.trim()),
            Addition::Service { host, name } => {
                format!("service {} on {}", name.trim(), host.trim())
            }
        }
    }
}

/// Adds the entry exactly as typed unless it is blank. Returns whether the registry changed.
pub fn apply(registry: &mut TargetRegistry, addition: &Addition) -> bool {
    if addition.is_blank() {
        return false;
    }

    match addition {
        Addition::Website(url) => registry.add_website(url),
        Addition::Host(address) => registry.add_host(address),
        Addition::Service { host, name } => registry.add_service(host, name),
    }
    true
}

pub fn add(addition: Addition, cfg: &Config) -> anyhow::Result<()> {
    let store = JsonFileStore::new(&cfg.registry_path);
    let mut registry: TargetRegistry = store.load();

    if !apply(&mut registry, &addition) {
        warn!("nothing to add: the entry is blank");
        return Ok(());
    }

    store.save(&registry)?;
    print::print_status(format!(
        "Added {} ({} targets in {})",
        addition.describe().color(colors::PRIMARY),
        registry.len(),
        store.path().display()
    ));
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
