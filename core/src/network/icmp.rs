//! ICMP echo ("ping") over a raw transport channel.
//!
//! Opening the channel needs root (or `CAP_NET_RAW`). Failing to open it is reported as
//! a [`ProbeFault::Socket`], which the host probe turns into an errored check rather than
//! an unreachable host.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::time::{Duration, Instant};

use pnet::packet::Packet;
use pnet::packet::icmp::{
    self, IcmpCode, IcmpPacket, IcmpTypes, echo_request::MutableEchoRequestPacket,
};
use pnet::packet::icmpv6::{
    Icmpv6Code, Icmpv6Types, echo_request::MutableEchoRequestPacket as MutableEchoRequestV6,
};
use pnet::packet::ip::IpNextHeaderProtocols;
use pnet::transport::{
    self, TransportChannelType, TransportProtocol, TransportReceiver, TransportSender,
};

use pulsr_common::error::ProbeFault;

const TRANSPORT_BUFFER_SIZE: usize = 4096;
const ECHO_PACKET_LEN: usize = 16;
const ECHO_SEQUENCE: u16 = 1;
const CHANNEL_TYPE_ICMP: TransportChannelType =
    TransportChannelType::Layer4(TransportProtocol::Ipv4(IpNextHeaderProtocols::Icmp));
const CHANNEL_TYPE_ICMPV6: TransportChannelType =
    TransportChannelType::Layer4(TransportProtocol::Ipv6(IpNextHeaderProtocols::Icmpv6));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EchoOutcome {
    Reply { rtt: Duration },
    NoReply,
}

/// Sends one echo request to `addr` and waits up to `wait` for the matching reply.
pub async fn echo(addr: IpAddr, wait: Duration) -> Result<EchoOutcome, ProbeFault> {
    tokio::task::spawn_blocking(move || match addr {
        IpAddr::V4(ipv4_addr) => echo_v4(ipv4_addr, wait),
        IpAddr::V6(ipv6_addr) => echo_v6(ipv6_addr, wait),
    })
    .await
    .map_err(|e| ProbeFault::Request(format!("echo task failed: {e}")))?
}

fn open_channel(
    channel_type: TransportChannelType,
) -> Result<(TransportSender, TransportReceiver), ProbeFault> {
    transport::transport_channel(TRANSPORT_BUFFER_SIZE, channel_type).map_err(ProbeFault::Socket)
}

fn echo_v4(addr: Ipv4Addr, wait: Duration) -> Result<EchoOutcome, ProbeFault> {
    let (mut tx, mut rx) = open_channel(CHANNEL_TYPE_ICMP)?;
    let identifier: u16 = rand::random();

    let mut buffer: [u8; ECHO_PACKET_LEN] = [0u8; ECHO_PACKET_LEN];
    let request = create_echo_request_v4(&mut buffer, identifier)?;

    let started: Instant = Instant::now();
    tx.send_to(request, IpAddr::V4(addr))
        .map_err(ProbeFault::Socket)?;

    let deadline: Instant = started + wait;
    let mut iter = transport::icmp_packet_iter(&mut rx);
    loop {
        let remaining: Duration = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Ok(EchoOutcome::NoReply);
        }

        match iter.next_with_timeout(remaining) {
            Ok(Some((reply, source))) => {
                let is_ours: bool = source == IpAddr::V4(addr)
                    && reply.get_icmp_type() == IcmpTypes::EchoReply
                    && matches_echo(reply.payload(), identifier);
                if is_ours {
                    return Ok(EchoOutcome::Reply {
                        rtt: started.elapsed(),
                    });
                }
            }
            Ok(None) => return Ok(EchoOutcome::NoReply),
            Err(e) => return Err(ProbeFault::Socket(e)),
        }
    }
}

// The kernel fills in the ICMPv6 checksum on raw sockets, so it is left at zero here.
fn echo_v6(addr: Ipv6Addr, wait: Duration) -> Result<EchoOutcome, ProbeFault> {
    let (mut tx, mut rx) = open_channel(CHANNEL_TYPE_ICMPV6)?;
    let identifier: u16 = rand::random();

    let mut buffer: [u8; ECHO_PACKET_LEN] = [0u8; ECHO_PACKET_LEN];
    let mut request = MutableEchoRequestV6::new(&mut buffer)
        .ok_or_else(|| ProbeFault::Request(String::from("echo buffer too small")))?;
    request.set_icmpv6_type(Icmpv6Types::EchoRequest);
    request.set_icmpv6_code(Icmpv6Code(0));
    request.set_identifier(identifier);
    request.set_sequence_number(ECHO_SEQUENCE);
    request.set_checksum(0);

    let started: Instant = Instant::now();
    tx.send_to(request, IpAddr::V6(addr))
        .map_err(ProbeFault::Socket)?;

    let deadline: Instant = started + wait;
    let mut iter = transport::icmpv6_packet_iter(&mut rx);
    loop {
        let remaining: Duration = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Ok(EchoOutcome::NoReply);
        }

        match iter.next_with_timeout(remaining) {
            Ok(Some((reply, source))) => {
                let is_ours: bool = source == IpAddr::V6(addr)
                    && reply.get_icmpv6_type() == Icmpv6Types::EchoReply
                    && matches_echo(reply.payload(), identifier);
                if is_ours {
                    return Ok(EchoOutcome::Reply {
                        rtt: started.elapsed(),
                    });
                }
            }
            Ok(None) => return Ok(EchoOutcome::NoReply),
            Err(e) => return Err(ProbeFault::Socket(e)),
        }
    }
}

fn create_echo_request_v4(
    buffer: &mut [u8],
    identifier: u16,
) -> Result<MutableEchoRequestPacket<'_>, ProbeFault> {
    let mut echo = MutableEchoRequestPacket::new(buffer)
        .ok_or_else(|| ProbeFault::Request(String::from("echo buffer too small")))?;

    echo.set_icmp_type(IcmpTypes::EchoRequest);
    echo.set_icmp_code(IcmpCode(0));
    echo.set_identifier(identifier);
    echo.set_sequence_number(ECHO_SEQUENCE);

    echo.set_checksum(0);
    let csm: u16 = {
        let echo_imm = echo.to_immutable();
        let icmp_pkt = IcmpPacket::new(echo_imm.packet())
            .ok_or_else(|| ProbeFault::Request(String::from("failed to create ICMP packet")))?;
        icmp::checksum(&icmp_pkt)
    };
    echo.set_checksum(csm);

    Ok(echo)
}

/// Echo payload starts with the identifier and the sequence number.
fn matches_echo(payload: &[u8], identifier: u16) -> bool {
    if payload.len() < 4 {
        return false;
    }
    let reply_id: u16 = u16::from_be_bytes([payload[0], payload[1]]);
    let reply_seq: u16 = u16::from_be_bytes([payload[2], payload[3]]);
    reply_id == identifier && reply_seq == ECHO_SEQUENCE
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
