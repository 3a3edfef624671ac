//! ICMP echo probing over unprivileged datagram ICMP sockets.
//!
//! The kernel fills in the identifier (the socket's local port) and the
//! checksum, so a request is just the 8-byte echo header with a sequence
//! number. ICMP gives no delivery guarantee, so requests are re-sent once per
//! slice until the budget runs out.

use super::sockets::{ProbeSocket, SocketKind, SocketOps};
use crate::inet::Family;
use std::{
    io,
    net::{IpAddr, SocketAddr},
    time::Duration,
};

pub const ICMP_ECHO: u8 = 8;
pub const ICMP_ECHOREPLY: u8 = 0;
pub const ICMP6_ECHO_REQUEST: u8 = 128;
pub const ICMP6_ECHO_REPLY: u8 = 129;

/// Length of an echo request/reply header.
pub const ECHO_HEADER_LEN: usize = 8;

/// Builds an echo request header carrying `seq`.
pub fn echo_request(family: Family, seq: u16) -> [u8; ECHO_HEADER_LEN] {
    let kind = match family {
        Family::V4 => ICMP_ECHO,
        Family::V6 => ICMP6_ECHO_REQUEST,
    };
    let seq = seq.to_be_bytes();
    [kind, 0, 0, 0, 0, 0, seq[0], seq[1]]
}

/// Checks a received header against the request it should answer.
///
/// The sequence check accepts replies to any earlier retransmission but
/// rejects numbers we have not sent yet.
pub fn is_echo_reply(packet: &[u8], family: Family, icmp_id: u16, last_seq: u32) -> bool {
    if packet.len() != ECHO_HEADER_LEN {
        return false;
    }
    let expected_type = match family {
        Family::V4 => ICMP_ECHOREPLY,
        Family::V6 => ICMP6_ECHO_REPLY,
    };
    if packet[0] != expected_type || packet[4..6] != icmp_id.to_be_bytes() {
        return false;
    }
    let received_seq = u16::from_be_bytes([packet[6], packet[7]]);
    u32::from(received_seq) <= last_seq
}

/// Pings `addr` until a valid reply arrives or `timeout` is spent.
///
/// Never fails: any socket error makes the result inconclusive (`false`).
pub(crate) fn icmp_echo(
    sockets: &dyn SocketOps,
    addr: IpAddr,
    timeout: Duration,
    source: Option<IpAddr>,
    ttl: u32,
    slice: Duration,
) -> bool {
    let family = Family::of(&addr);
    let result = sockets
        .open(family, SocketKind::IcmpDatagram)
        .and_then(|socket| echo_loop(socket.as_ref(), addr, timeout, source, ttl, slice));

    match result {
        Ok(reachable) => reachable,
        Err(e) => {
            tracing::debug!(addr = %addr, error = %e, "ICMP probe inconclusive");
            false
        }
    }
}

/// Shortest wait per echo request; a zero slice would never spend the budget.
pub const MIN_SLICE: Duration = Duration::from_millis(1);

fn echo_loop(
    socket: &dyn ProbeSocket,
    addr: IpAddr,
    timeout: Duration,
    source: Option<IpAddr>,
    ttl: u32,
    slice: Duration,
) -> io::Result<bool> {
    let family = Family::of(&addr);
    if ttl > 0 {
        socket.set_ttl(ttl)?;
    }
    if let Some(source) = source {
        socket.bind(source)?;
    }

    let slice = slice.max(MIN_SLICE);
    let dest = SocketAddr::new(addr, 0);
    let mut remaining = timeout;
    let mut seq: u32 = 1;
    while !remaining.is_zero() {
        let wait = remaining.min(slice);

        let request = echo_request(family, seq as u16);
        socket.send_to(&request, dest)?;
        let icmp_id = socket.local_port()?;

        let mut reply = [0u8; ECHO_HEADER_LEN];
        match socket.recv_from(&mut reply, wait) {
            Ok((size, from)) => {
                if from == addr && is_echo_reply(&reply[..size], family, icmp_id, seq) {
                    tracing::debug!(addr = %addr, seq, "ICMP echo reply received");
                    return Ok(true);
                }
                tracing::trace!(addr = %addr, from = %from, seq, "ignoring unexpected ICMP packet");
            }
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
                tracing::trace!(addr = %addr, seq, "ICMP slice elapsed");
            }
            Err(e) => return Err(e),
        }

        remaining -= wait;
        seq += 1;
    }
    Ok(false)
}
