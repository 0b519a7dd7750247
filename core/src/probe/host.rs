use std::future::Future;
use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{Instant, timeout};
use tracing::trace;

use pulsr_common::error::ProbeFault;
use pulsr_common::probe::HostProbe;
use pulsr_common::verdict::Assessment;

use crate::network::{self, icmp, icmp::EchoOutcome, tcp};

pub const REACHABLE: &str = "Reachable";
pub const UNREACHABLE: &str = "Unreachable";

/// Pings a host with a single ICMP echo.
pub struct IcmpHostProbe {
    timeout: Duration,
}

impl IcmpHostProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn ping(&self, address: &str) -> Result<EchoOutcome, ProbeFault> {
        let started: Instant = Instant::now();
        let ip: IpAddr = first_address(address, self.timeout).await?;
        icmp::echo(ip, left_of(self.timeout, started)).await
    }
}

#[async_trait]
impl HostProbe for IcmpHostProbe {
    async fn check_host(&self, address: &str) -> Assessment {
        match self.ping(address).await {
            Ok(EchoOutcome::Reply { rtt }) => {
                trace!("{address} answered in {rtt:?}");
                Assessment::healthy(REACHABLE)
            }
            Ok(EchoOutcome::NoReply) => Assessment::unhealthy(UNREACHABLE),
            Err(fault) => Assessment::errored(fault.to_string()),
        }
    }
}

/// Considers a host up when any of a few TCP ports answers, even with a reset.
///
/// Works without raw sockets, at the cost of missing hosts that silently drop every
/// probed port.
pub struct TcpHostProbe {
    ports: Vec<u16>,
    timeout: Duration,
}

impl TcpHostProbe {
    pub fn new(ports: Vec<u16>, timeout: Duration) -> Self {
        Self { ports, timeout }
    }
}

#[async_trait]
impl HostProbe for TcpHostProbe {
    async fn check_host(&self, address: &str) -> Assessment {
        let started: Instant = Instant::now();
        let ip: IpAddr = match first_address(address, self.timeout).await {
            Ok(ip) => ip,
            Err(fault) => return Assessment::errored(fault.to_string()),
        };

        if tcp::any_port_answers(ip, &self.ports, left_of(self.timeout, started)).await {
            Assessment::healthy(REACHABLE)
        } else {
            Assessment::unhealthy(UNREACHABLE)
        }
    }
}

/// Name resolution shares the host timeout with the check that follows it.
async fn first_address(address: &str, limit: Duration) -> Result<IpAddr, ProbeFault> {
    first_address_within(address, limit, network::resolve(address)).await
}

async fn first_address_within<F>(
    address: &str,
    limit: Duration,
    lookup: F,
) -> Result<IpAddr, ProbeFault>
where
    F: Future<Output = Result<Vec<IpAddr>, ProbeFault>>,
{
    let ips: Vec<IpAddr> = match timeout(limit, lookup).await {
        Ok(resolved) => resolved?,
        Err(_) => {
            return Err(ProbeFault::Resolve {
                address: address.to_string(),
                reason: format!("timed out after {limit:?}"),
            });
        }
    };
    ips.into_iter().next().ok_or_else(|| ProbeFault::Resolve {
        address: address.to_string(),
        reason: String::from("no addresses found"),
    })
}

fn left_of(budget: Duration, started: Instant) -> Duration {
    budget.saturating_sub(started.elapsed())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
