//! # Monitoring Targets
//!
//! Defines what the agent keeps an eye on.
//!
//! A target is one of:
//! * A website URL (scheme optional).
//! * A host name or IP address.
//! * A named service on a host.
//!
//! Entries are opaque strings. Nothing is validated when a target is added; a malformed
//! entry only shows up as a failed check later on.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three kinds of target, in the order a cycle reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TargetKind {
    Website,
    Host,
    Service,
}

impl TargetKind {
    /// Section header used by the interactive report.
    pub fn section_title(&self) -> &'static str {
        match self {
            TargetKind::Website => "Website Status",
            TargetKind::Host => "Server Status (Ping)",
            TargetKind::Service => "Service Status",
        }
    }

    /// Short title carried by an alert for this kind of target.
    pub fn alert_title(&self) -> &'static str {
        match self {
            TargetKind::Website => "Website Down",
            TargetKind::Host => "Server Unreachable",
            TargetKind::Service => "Service Alert",
        }
    }

    /// Prefix used in log lines.
    pub fn label(&self) -> &'static str {
        match self {
            TargetKind::Website => "Website",
            TargetKind::Host => "Server",
            TargetKind::Service => "Service",
        }
    }
}

/// A single addressable entity under monitoring.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    Website { url: String },
    Host { address: String },
    Service { host: String, name: String },
}

impl Target {
    pub fn kind(&self) -> TargetKind {
        match self {
            Target::Website { .. } => TargetKind::Website,
            Target::Host { .. } => TargetKind::Host,
            Target::Service { .. } => TargetKind::Service,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Website { url } => write!(f, "{url}"),
            Target::Host { address } => write!(f, "{address}"),
            Target::Service { host, name } => write!(f, "{name} on {host}"),
        }
    }
}

/// A service registered on a host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    #[serde(rename = "Server", default)]
    pub host: String,
    #[serde(rename = "Service", default)]
    pub name: String,
}

impl ServiceEntry {
    pub fn new(host: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            name: name.into(),
        }
    }
}

/// The user's list of targets.
///
/// Insertion order is preserved within each kind and duplicates are kept: the same URL
/// added twice is checked and reported twice.
///
/// The serialized field names match the `monitorlist.json` layout so existing lists keep
/// loading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRegistry {
    #[serde(rename = "WebsiteUrls", default)]
    pub websites: Vec<String>,
    #[serde(rename = "ServerNamesOrIps", default)]
    pub hosts: Vec<String>,
    #[serde(rename = "Services", default)]
    pub services: Vec<ServiceEntry>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_website(&mut self, url: impl Into<String>) {
        self.websites.push(url.into());
    }

    pub fn add_host(&mut self, address: impl Into<String>) {
        self.hosts.push(address.into());
    }

    pub fn add_service(&mut self, host: impl Into<String>, name: impl Into<String>) {
        self.services.push(ServiceEntry::new(host, name));
    }

    pub fn len(&self) -> usize {
        self.websites.len() + self.hosts.len() + self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flattens the registry into cycle order: websites, then hosts, then services.
    pub fn targets(&self) -> Vec<Target> {
        let websites = self
            .websites
            .iter()
            .map(|url| Target::Website { url: url.clone() });
        let hosts = self.hosts.iter().map(|address| Target::Host {
            address: address.clone(),
        });
        let services = self.services.iter().map(|entry| Target::Service {
            host: entry.host.clone(),
            name: entry.name.clone(),
        });

        websites.chain(hosts).chain(services).collect()
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_are_grouped_by_kind_in_insertion_order() {
        let mut registry = TargetRegistry::new();
        registry.add_service("host1", "nginx");
        registry.add_host("10.0.0.1");
        registry.add_website("b.com");
        registry.add_website("a.com");

        let kinds: Vec<TargetKind> = registry.targets().iter().map(Target::kind).collect();
        assert_eq!(
            kinds,
            vec![
                TargetKind::Website,
                TargetKind::Website,
                TargetKind::Host,
                TargetKind::Service
            ]
        );
        assert_eq!(
            registry.targets()[0],
            Target::Website {
                url: "b.com".into()
            }
        );
    }

    #[test]
    fn duplicates_and_garbage_are_kept() {
        let mut registry = TargetRegistry::new();
        registry.add_website("a.com");
        registry.add_website("a.com");
        registry.add_host("not a host at all");

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.targets().len(), 3);
    }

    #[test]
    fn reads_the_monitorlist_layout() {
        let json = r#"{
            "WebsiteUrls": ["example.com"],
            "ServerNamesOrIps": ["10.0.0.1"],
            "Services": [{ "Server": "host1", "Service": "nginx" }]
        }"#;

        let registry: TargetRegistry = serde_json::from_str(json).unwrap();
        assert_eq!(registry.websites, vec!["example.com".to_string()]);
        assert_eq!(registry.hosts, vec!["10.0.0.1".to_string()]);
        assert_eq!(registry.services, vec![ServiceEntry::new("host1", "nginx")]);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let registry: TargetRegistry = serde_json::from_str(r#"{"WebsiteUrls":["x"]}"#).unwrap();
        assert_eq!(registry.websites.len(), 1);
        assert!(registry.hosts.is_empty());
        assert!(registry.services.is_empty());
    }

    #[test]
    fn service_target_displays_name_on_host() {
        let target = Target::Service {
            host: "host1".into(),
            name: "nginx".into(),
        };
        assert_eq!(target.to_string(), "nginx on host1");
    }
}
