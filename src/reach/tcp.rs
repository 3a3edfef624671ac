//! TCP connect probe against the echo port.

use super::sockets::{SocketKind, SocketOps};
use crate::base::context::IoResultExt;
use crate::base::neterror::NetError;
use crate::inet::Family;
use std::{
    io,
    net::{IpAddr, SocketAddr},
    time::Duration,
};

/// Connects to `addr:port` within `timeout`.
///
/// A refused connection still proves the host answered, so it counts as
/// reachable. Other connect failures are a plain `false`; only failing to
/// set the socket up is an error.
pub(crate) fn tcp_echo(
    sockets: &dyn SocketOps,
    addr: IpAddr,
    port: u16,
    timeout: Duration,
    source: Option<IpAddr>,
    ttl: u32,
) -> Result<bool, NetError> {
    if timeout.is_zero() {
        return Ok(false);
    }

    let socket = sockets
        .open(Family::of(&addr), SocketKind::Stream)
        .socket_context("open")?;
    if ttl > 0 {
        socket.set_ttl(ttl).socket_context("set_ttl")?;
    }
    if let Some(source) = source {
        socket.bind(source).socket_context("bind")?;
    }

    match socket.connect(SocketAddr::new(addr, port), timeout) {
        Ok(()) => {
            tracing::debug!(addr = %addr, port, "TCP echo connected");
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::ConnectionRefused => {
            tracing::debug!(addr = %addr, port, "TCP echo refused, host is up");
            Ok(true)
        }
        Err(e) => {
            tracing::debug!(addr = %addr, port, error = %e, "TCP echo failed");
            Ok(false)
        }
    }
}
