//! The address-info capability the resolver is built on.
//!
//! Implementations wrap the platform's `getaddrinfo`/`getnameinfo`. The
//! resolver never talks to the OS directly, which is what lets tests swap in
//! a scripted backend.

use std::{fmt, net::IpAddr, sync::Arc};
use thiserror::Error;

/// Hints passed through to `getaddrinfo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddrInfoHints {
    pub flags: i32,
    pub family: i32,
    pub socktype: i32,
}

impl AddrInfoHints {
    /// Both families, one socket type, only families usable on this host.
    ///
    /// A socket type is pinned because leaving it open makes every address
    /// appear once per type.
    pub fn dual_stack() -> Self {
        Self {
            flags: libc::AI_ADDRCONFIG,
            family: libc::AF_UNSPEC,
            socktype: libc::SOCK_STREAM,
        }
    }
}

impl Default for AddrInfoHints {
    fn default() -> Self {
        Self::dual_stack()
    }
}

/// `NI_NAMEREQD`: fail instead of returning the numeric form.
pub const NI_NAMEREQD: i32 = libc::NI_NAMEREQD;

/// A `getaddrinfo`/`getnameinfo` failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct GaiError {
    /// `EAI_*` code
    pub code: i32,
    /// `gai_strerror` text for `code`
    pub message: String,
}

impl GaiError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Abstract name-resolution backend.
///
/// Implementations must be thread-safe; calls may block the calling thread.
pub trait AddrInfo: Send + Sync {
    /// Forward lookup of `host` on network `net_id`.
    fn getaddrinfo(
        &self,
        host: &str,
        hints: &AddrInfoHints,
        net_id: u32,
    ) -> Result<Vec<IpAddr>, GaiError>;

    /// Reverse lookup of `ip`.
    fn getnameinfo(&self, ip: IpAddr, flags: i32) -> Result<String, GaiError>;
}

/// Blanket implementation for Arc-wrapped backends.
impl<A: AddrInfo + ?Sized> AddrInfo for Arc<A> {
    fn getaddrinfo(
        &self,
        host: &str,
        hints: &AddrInfoHints,
        net_id: u32,
    ) -> Result<Vec<IpAddr>, GaiError> {
        (**self).getaddrinfo(host, hints, net_id)
    }

    fn getnameinfo(&self, ip: IpAddr, flags: i32) -> Result<String, GaiError> {
        (**self).getnameinfo(ip, flags)
    }
}

impl fmt::Debug for dyn AddrInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AddrInfo")
    }
}
