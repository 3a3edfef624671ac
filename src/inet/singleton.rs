//! Lazily computed wildcard and loopback addresses.
//!
//! Both values are built on first use rather than at load time, and each
//! lives in its own compute-once cell so the two never contend.

use super::address::InetAddress;
use std::{
    net::{IpAddr, Ipv4Addr, Ipv6Addr},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, LazyLock, OnceLock,
    },
};

/// Owner of the `any` and `loopback` address singletons.
#[derive(Debug, Default)]
pub struct SingletonAddressProvider {
    any_local: OnceLock<Arc<InetAddress>>,
    loopback: OnceLock<Arc<[InetAddress]>>,
    computations: AtomicUsize,
}

impl SingletonAddressProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide provider.
    pub fn global() -> &'static SingletonAddressProvider {
        static PROVIDER: LazyLock<SingletonAddressProvider> =
            LazyLock::new(SingletonAddressProvider::new);
        &PROVIDER
    }

    /// The IPv6 unspecified address `::`, labelled `"::"`.
    pub fn any_local_address(&self) -> Arc<InetAddress> {
        self.any_local
            .get_or_init(|| {
                self.computations.fetch_add(1, Ordering::Relaxed);
                tracing::trace!("computing any-local address");
                Arc::new(InetAddress::with_host(IpAddr::V6(Ipv6Addr::UNSPECIFIED), "::"))
            })
            .clone()
    }

    /// IPv6 loopback followed by IPv4 loopback.
    pub fn loopback_addresses(&self) -> Arc<[InetAddress]> {
        self.loopback
            .get_or_init(|| {
                self.computations.fetch_add(1, Ordering::Relaxed);
                tracing::trace!("computing loopback addresses");
                Arc::from(vec![
                    InetAddress::with_host(IpAddr::V6(Ipv6Addr::LOCALHOST), "ip6-localhost"),
                    InetAddress::with_host(IpAddr::V4(Ipv4Addr::LOCALHOST), "localhost"),
                ])
            })
            .clone()
    }

    /// Number of singleton values this provider has built.
    pub fn computations(&self) -> usize {
        self.computations.load(Ordering::Relaxed)
    }
}
