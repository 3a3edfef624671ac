//! Resolved addresses and numeric literal parsing.

use std::{
    fmt,
    hash::{Hash, Hasher},
    net::{IpAddr, Ipv4Addr, Ipv6Addr},
};

/// Address family of an [`IpAddr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    V4,
    V6,
}

impl Family {
    pub fn of(ip: &IpAddr) -> Self {
        match ip {
            IpAddr::V4(_) => Family::V4,
            IpAddr::V6(_) => Family::V6,
        }
    }
}

/// An IP address together with the hostname it was resolved from.
///
/// Equality and hashing consider the IP only; the labels are carried along so
/// later reverse lookups and display see the name the caller asked for.
#[derive(Clone)]
pub struct InetAddress {
    ip: IpAddr,
    host_name: Option<String>,
    original_host_name: Option<String>,
}

impl InetAddress {
    /// Creates an unlabelled address.
    pub fn new(ip: IpAddr) -> Self {
        Self {
            ip,
            host_name: None,
            original_host_name: None,
        }
    }

    /// Creates an address whose requested and original names are both `host`.
    pub fn with_host(ip: IpAddr, host: impl Into<String>) -> Self {
        let host = host.into();
        Self {
            ip,
            host_name: Some(host.clone()),
            original_host_name: Some(host),
        }
    }

    #[inline]
    pub fn ip(&self) -> IpAddr {
        self.ip
    }

    #[inline]
    pub fn family(&self) -> Family {
        Family::of(&self.ip)
    }

    pub fn host_name(&self) -> Option<&str> {
        self.host_name.as_deref()
    }

    pub fn original_host_name(&self) -> Option<&str> {
        self.original_host_name.as_deref()
    }
}

impl PartialEq for InetAddress {
    fn eq(&self, other: &Self) -> bool {
        self.ip == other.ip
    }
}

impl Eq for InetAddress {}

impl Hash for InetAddress {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ip.hash(state);
    }
}

impl From<IpAddr> for InetAddress {
    fn from(ip: IpAddr) -> Self {
        Self::new(ip)
    }
}

impl From<Ipv4Addr> for InetAddress {
    fn from(ip: Ipv4Addr) -> Self {
        Self::new(IpAddr::V4(ip))
    }
}

impl From<Ipv6Addr> for InetAddress {
    fn from(ip: Ipv6Addr) -> Self {
        Self::new(IpAddr::V6(ip))
    }
}

impl fmt::Debug for InetAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Formats as `hostname/ip`, with an empty hostname when unlabelled.
impl fmt::Display for InetAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.host_name.as_deref().unwrap_or(""), self.ip)
    }
}

/// Parses a numeric IPv4 or IPv6 literal, accepting `[v6]` bracket form.
///
/// Returns `None` for anything that requires name resolution. IPv4 must be a
/// full dotted quad; shorthand forms like `"1.2"` are hostnames here.
pub fn parse_numeric_address(host: &str) -> Option<IpAddr> {
    if let Some(inner) = host.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
        return inner.parse::<Ipv6Addr>().ok().map(IpAddr::V6);
    }

    if let Ok(addr) = host.parse::<Ipv4Addr>() {
        return Some(IpAddr::V4(addr));
    }

    host.parse::<Ipv6Addr>().ok().map(IpAddr::V6)
}

/// A local network interface used as a probe source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInterface {
    name: String,
    addrs: Vec<IpAddr>,
}

impl NetworkInterface {
    pub fn new(name: impl Into<String>, addrs: Vec<IpAddr>) -> Self {
        Self {
            name: name.into(),
            addrs,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn addrs(&self) -> &[IpAddr] {
        &self.addrs
    }

    /// First interface address of the same family as `target`.
    pub fn source_for(&self, target: &IpAddr) -> Option<IpAddr> {
        let family = Family::of(target);
        self.addrs.iter().copied().find(|a| Family::of(a) == family)
    }
}
