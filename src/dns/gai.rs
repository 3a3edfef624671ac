//! System address-info backend using the platform `getaddrinfo`.
//!
//! # When to Use
//!
//! - Default backend for [`HostResolver`](super::HostResolver)
//! - Respects system resolver configuration (/etc/hosts, /etc/resolv.conf, nsswitch)
//!
//! Calls block the calling thread. Use the async [`Resolve`](super::Resolve)
//! adapter from async code.

use super::addrinfo::{AddrInfo, AddrInfoHints, GaiError};
use std::{
    io,
    net::{IpAddr, SocketAddr},
};

/// `getaddrinfo`-backed [`AddrInfo`].
///
/// Per-network routing is not available through the portable call, so the
/// network id is accepted and ignored.
#[derive(Clone, Debug, Default)]
pub struct SystemAddrInfo;

impl SystemAddrInfo {
    /// Creates a new `SystemAddrInfo`.
    pub fn new() -> Self {
        Self
    }
}

/// Prefix `dns_lookup` puts in front of the `gai_strerror` text.
const LOOKUP_PREFIX: &str = "failed to lookup address information: ";

fn gai_error(err: dns_lookup::LookupError) -> GaiError {
    let code = err.error_num();
    let text = io::Error::from(err).to_string();
    let message = match text.strip_prefix(LOOKUP_PREFIX) {
        Some(reason) => reason.to_owned(),
        None => text,
    };
    GaiError::new(code, message)
}

impl AddrInfo for SystemAddrInfo {
    fn getaddrinfo(
        &self,
        host: &str,
        hints: &AddrInfoHints,
        net_id: u32,
    ) -> Result<Vec<IpAddr>, GaiError> {
        tracing::debug!(host = %host, net_id, "resolving via getaddrinfo");

        let hints = dns_lookup::AddrInfoHints {
            flags: hints.flags,
            address: hints.family,
            socktype: hints.socktype,
            protocol: 0,
        };
        let iter = dns_lookup::getaddrinfo(Some(host), None, Some(hints)).map_err(gai_error)?;

        let mut addrs = Vec::new();
        for info in iter {
            match info {
                Ok(info) => addrs.push(info.sockaddr.ip()),
                Err(e) => {
                    tracing::warn!(host = %host, error = %e, "skipping unparseable addrinfo entry")
                }
            }
        }
        Ok(addrs)
    }

    fn getnameinfo(&self, ip: IpAddr, flags: i32) -> Result<String, GaiError> {
        tracing::debug!(ip = %ip, "reverse resolving via getnameinfo");
        dns_lookup::getnameinfo(&SocketAddr::new(ip, 0), flags)
            .map(|(host, _service)| host)
            .map_err(gai_error)
    }
}
