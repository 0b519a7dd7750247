use std::io::ErrorKind;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Ports tried when probing a host without ICMP.
pub const HANDSHAKE_PORTS: &[u16] = &[80, 443, 22];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handshake {
    /// The connection was accepted.
    Completed,
    /// The host answered with a reset, so it is up but the port is closed.
    Refused,
    /// The network reported the host as unreachable.
    Failed,
    /// Nothing came back before the timeout.
    Silent,
}

impl Handshake {
    pub fn host_answered(&self) -> bool {
        matches!(self, Handshake::Completed | Handshake::Refused)
    }
}

pub async fn handshake_probe(addr: SocketAddr, probe_timeout: Duration) -> Handshake {
    match timeout(probe_timeout, TcpStream::connect(addr)).await {
        Ok(Ok(_)) => Handshake::Completed,
        Ok(Err(e)) if e.kind() == ErrorKind::ConnectionRefused => Handshake::Refused,
        Ok(Err(_)) => Handshake::Failed,
        Err(_elapsed) => Handshake::Silent,
    }
}

/// Tries every port at once and reports whether any of them got an answer from `ip`.
pub async fn any_port_answers(ip: IpAddr, ports: &[u16], probe_timeout: Duration) -> bool {
    let mut attempts = ports
        .iter()
        .map(|port| handshake_probe(SocketAddr::new(ip, *port), probe_timeout))
        .collect::<FuturesUnordered<_>>();

    while let Some(result) = attempts.next().await {
        if result.host_answered() {
            return true;
        }
    }
    false
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
