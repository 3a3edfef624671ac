//! # hostprobe
//!
//! Dual-stack hostname resolution and host reachability for Rust.
//!
//! `hostprobe` resolves hostnames to both IPv4 and IPv6 addresses through
//! the system resolver, caching successes and failures per
//! `(hostname, netId)`, and tests reachability with an ICMP echo that falls
//! back to a TCP connect.
//!
//! ## Features
//!
//! - **Address Cache**: positive and negative entries, 2 s TTL, 16 keys by default
//! - **Literal Shortcuts**: numeric and empty hostnames never hit the resolver
//! - **Reachability**: unprivileged ICMP echo, then TCP port 7 (refusal counts as up)
//! - **Pluggable Backends**: `AddrInfo` and `SocketOps` traits for tests and platforms
//! - **Async Adapters**: `Resolve` and `is_reachable` on tokio's blocking pool
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hostprobe::base::config::HostprobeConfig;
//! use hostprobe::DualStackImpl;
//! use std::time::Duration;
//!
//! let net = DualStackImpl::system(HostprobeConfig::default());
//! let addrs = net.lookup_all_host_addr(Some("example.com"), 0)?;
//! let up = net.is_reachable(&addrs[0], Duration::from_secs(2), None, 0)?;
//! println!("{} reachable: {}", addrs[0], up);
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Errors and configuration
//! - [`dns`] - Address cache, resolver, and `getaddrinfo` backend
//! - [`inet`] - Address types and the any/loopback singletons
//! - [`reach`] - ICMP/TCP reachability prober

pub mod base;
pub mod dns;
pub mod inet;
mod inetimpl;
pub mod reach;

pub use inetimpl::DualStackImpl;
