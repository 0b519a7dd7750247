//! Low-level reachability primitives used by the host probe.
//!
//! * [`icmp`]: one ICMP echo over a raw socket (requires root).
//! * [`tcp`]: TCP handshake, usable without privileges.

pub mod icmp;
pub mod tcp;

use std::net::IpAddr;

use pulsr_common::error::ProbeFault;

/// Resolves a host entry to its addresses, IPv4 first.
///
/// Literal IP addresses are returned as-is without touching DNS.
pub async fn resolve(address: &str) -> Result<Vec<IpAddr>, ProbeFault> {
    let address: &str = address.trim();
    if address.is_empty() {
        return Err(ProbeFault::EmptyAddress);
    }

    if let Ok(ip) = address.parse::<IpAddr>() {
        return Ok(vec![ip]);
    }

    let resolved = tokio::net::lookup_host((address, 0))
        .await
        .map_err(|e| ProbeFault::Resolve {
            address: address.to_string(),
            reason: e.to_string(),
        })?;

    let mut ips: Vec<IpAddr> = resolved.map(|socket_addr| socket_addr.ip()).collect();
    ips.sort();
    ips.dedup();

    if ips.is_empty() {
        return Err(ProbeFault::Resolve {
            address: address.to_string(),
            reason: String::from("no addresses found"),
        });
    }

    Ok(ips)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
