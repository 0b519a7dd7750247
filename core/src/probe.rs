//! Concrete probes and the [`ProbeSet`] bundling one probe per target kind.
//!
//! High-level modules depend on the port traits from `pulsr_common::probe` only; this
//! module picks the implementations from the [`Config`].

pub mod host;
pub mod service;
pub mod website;

use std::sync::Arc;

use pulsr_common::config::{Config, HostStrategy};
use pulsr_common::probe::{HostProbe, ServiceProbe, WebsiteProbe};
use tracing::{debug, warn};

use crate::network::tcp::HANDSHAKE_PORTS;
use crate::service as providers;

pub use host::{IcmpHostProbe, TcpHostProbe};
pub use service::ServiceStateProbe;
pub use website::HttpWebsiteProbe;

/// One probe per target kind.
#[derive(Clone)]
pub struct ProbeSet {
    pub website: Arc<dyn WebsiteProbe>,
    pub host: Arc<dyn HostProbe>,
    pub service: Arc<dyn ServiceProbe>,
}

impl ProbeSet {
    pub fn new(
        website: Arc<dyn WebsiteProbe>,
        host: Arc<dyn HostProbe>,
        service: Arc<dyn ServiceProbe>,
    ) -> Self {
        Self {
            website,
            host,
            service,
        }
    }

    /// Builds the production probes described by `cfg`.
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let website: Arc<dyn WebsiteProbe> = Arc::new(HttpWebsiteProbe::new(cfg.website_timeout)?);
        let host: Arc<dyn HostProbe> = build_host_probe(cfg);
        let provider = providers::from_config(cfg.service_backend);
        let service: Arc<dyn ServiceProbe> = Arc::new(ServiceStateProbe::new(provider));

        Ok(Self::new(website, host, service))
    }
}

/// The wire method a host check ends up using.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HostMethod {
    Icmp,
    Tcp,
}

fn host_method(strategy: HostStrategy, privileged: bool) -> HostMethod {
    match strategy {
        HostStrategy::Icmp => HostMethod::Icmp,
        HostStrategy::Tcp => HostMethod::Tcp,
        HostStrategy::Auto if privileged => HostMethod::Icmp,
        HostStrategy::Auto => HostMethod::Tcp,
    }
}

fn build_host_probe(cfg: &Config) -> Arc<dyn HostProbe> {
    let privileged: bool = is_root::is_root();

    match host_method(cfg.host_strategy, privileged) {
        HostMethod::Icmp => {
            if !privileged {
                warn!("ICMP host checks need root; host checks will report errors");
            }
            debug!("host checks use ICMP echo");
            Arc::new(IcmpHostProbe::new(cfg.host_timeout))
        }
        HostMethod::Tcp => {
            debug!("host checks use TCP handshakes on {:?}", HANDSHAKE_PORTS);
            Arc::new(TcpHostProbe::new(HANDSHAKE_PORTS.to_vec(), cfg.host_timeout))
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
