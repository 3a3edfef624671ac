//! Host reachability probing.
//!
//! - [`ReachabilityProber`]: ICMP echo, then a TCP connect to the echo port
//! - [`icmp`]: echo header layout and reply validation
//! - [`SocketOps`]: the socket capability, with [`SystemSockets`] over `socket2`

pub mod icmp;
mod prober;
mod sockets;
mod tcp;

pub use prober::ReachabilityProber;
pub use sockets::{ProbeSocket, SocketKind, SocketOps, SystemSockets};
