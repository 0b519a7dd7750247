use pulsr_common::config::Config;
use pulsr_common::store::RegistryStore;
use pulsr_common::target::{TargetKind, TargetRegistry};
use pulsr_core::registry::JsonFileStore;

use crate::pprint;
use crate::terminal::print;

pub fn list(cfg: &Config) -> anyhow::Result<()> {
    let store = JsonFileStore::new(&cfg.registry_path);
    let registry: TargetRegistry = store.load();

    print::header("registered targets", cfg.quiet);

    let services: Vec<String> = registry
        .services
        .iter()
        .map(|entry| format!("{} on {}", entry.name, entry.host))
        .collect();
    let groups: [(TargetKind, &[String]); 3] = [
        (TargetKind::Website, registry.websites.as_slice()),
        (TargetKind::Host, registry.hosts.as_slice()),
        (TargetKind::Service, services.as_slice()),
    ];

    for (idx, (kind, entries)) in groups.iter().enumerate() {
        print::tree_head(idx, print::kind_heading(*kind));
        print::as_tree_one_level(entries);
        if idx + 1 != groups.len() {
            pprint!();
        }
    }

    if cfg.quiet == 0 {
        print::fat_separator();
        print::centerln(&format!(
            "{} targets in {}",
            registry.len(),
            store.path().display()
        ));
    }
    Ok(())
}
