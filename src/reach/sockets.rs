//! The socket capability used by the reachability prober.
//!
//! [`SystemSockets`] is the `socket2`-backed implementation. Sockets are
//! closed when dropped, so every exit path of a probe releases them.

use crate::inet::Family;
use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use std::{
    fmt, io,
    mem::MaybeUninit,
    net::{IpAddr, SocketAddr},
    time::Duration,
};

/// What kind of probe socket to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketKind {
    /// Datagram ICMP ("ping") socket for the matching family.
    IcmpDatagram,
    /// TCP stream socket.
    Stream,
}

/// An open probe socket. Dropping it closes the descriptor.
pub trait ProbeSocket: Send {
    /// Sets the IPv4 TTL or IPv6 unicast hop limit.
    fn set_ttl(&self, ttl: u32) -> io::Result<()>;

    /// Binds to `addr` on an ephemeral port.
    fn bind(&self, addr: IpAddr) -> io::Result<()>;

    fn connect(&self, addr: SocketAddr, timeout: Duration) -> io::Result<()>;

    fn send_to(&self, buf: &[u8], dest: SocketAddr) -> io::Result<usize>;

    /// Waits up to `timeout` for one datagram.
    ///
    /// An elapsed timeout is reported as `WouldBlock` or `TimedOut`.
    fn recv_from(&self, buf: &mut [u8], timeout: Duration) -> io::Result<(usize, IpAddr)>;

    /// Local port; for ICMP datagram sockets this is the echo identifier.
    fn local_port(&self) -> io::Result<u16>;
}

/// Factory for probe sockets.
pub trait SocketOps: Send + Sync {
    fn open(&self, family: Family, kind: SocketKind) -> io::Result<Box<dyn ProbeSocket>>;
}

impl fmt::Debug for dyn SocketOps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SocketOps")
    }
}

/// Real sockets via `socket2`.
#[derive(Clone, Debug, Default)]
pub struct SystemSockets;

impl SystemSockets {
    pub fn new() -> Self {
        Self
    }
}

impl SocketOps for SystemSockets {
    fn open(&self, family: Family, kind: SocketKind) -> io::Result<Box<dyn ProbeSocket>> {
        let domain = match family {
            Family::V4 => Domain::IPV4,
            Family::V6 => Domain::IPV6,
        };
        let inner = match kind {
            SocketKind::IcmpDatagram => {
                let protocol = match family {
                    Family::V4 => Protocol::ICMPV4,
                    Family::V6 => Protocol::ICMPV6,
                };
                Socket::new(domain, Type::DGRAM, Some(protocol))?
            }
            SocketKind::Stream => Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?,
        };
        tracing::trace!(?family, ?kind, "opened probe socket");
        Ok(Box::new(SystemSocket { inner, family }))
    }
}

struct SystemSocket {
    inner: Socket,
    family: Family,
}

impl ProbeSocket for SystemSocket {
    fn set_ttl(&self, ttl: u32) -> io::Result<()> {
        match self.family {
            Family::V4 => self.inner.set_ttl(ttl),
            Family::V6 => self.inner.set_unicast_hops_v6(ttl),
        }
    }

    fn bind(&self, addr: IpAddr) -> io::Result<()> {
        self.inner.bind(&SockAddr::from(SocketAddr::new(addr, 0)))
    }

    fn connect(&self, addr: SocketAddr, timeout: Duration) -> io::Result<()> {
        self.inner.connect_timeout(&SockAddr::from(addr), timeout)
    }

    fn send_to(&self, buf: &[u8], dest: SocketAddr) -> io::Result<usize> {
        self.inner.send_to(buf, &SockAddr::from(dest))
    }

    fn recv_from(&self, buf: &mut [u8], timeout: Duration) -> io::Result<(usize, IpAddr)> {
        self.inner.set_read_timeout(Some(timeout))?;
        // SAFETY: `recv_from` never de-initializes bytes, and every `u8` is a
        // valid `MaybeUninit<u8>`.
        let uninit = unsafe { &mut *(buf as *mut [u8] as *mut [MaybeUninit<u8>]) };
        let (size, from) = self.inner.recv_from(uninit)?;
        let from = from
            .as_socket()
            .map(|addr| addr.ip())
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "non-IP sender"))?;
        Ok((size, from))
    }

    fn local_port(&self) -> io::Result<u16> {
        self.inner
            .local_addr()?
            .as_socket()
            .map(|addr| addr.port())
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "non-IP local address"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, TcpListener};

    #[test]
    fn test_stream_connect_to_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let target = listener.local_addr().unwrap();

        let socket = SystemSockets::new()
            .open(Family::V4, SocketKind::Stream)
            .unwrap();
        socket.bind(IpAddr::V4(Ipv4Addr::LOCALHOST)).unwrap();
        socket.connect(target, Duration::from_secs(1)).unwrap();
        assert_ne!(socket.local_port().unwrap(), 0);
    }

    #[test]
    fn test_stream_connect_refused() {
        // Grab a free port, then close the listener so nothing accepts.
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();

        let socket = SystemSockets::new()
            .open(Family::V4, SocketKind::Stream)
            .unwrap();
        let err = socket
            .connect(
                SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), port),
                Duration::from_secs(1),
            )
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionRefused);
    }
}
