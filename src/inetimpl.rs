//! Dual-stack address implementation.
//!
//! Bundles resolution, reverse lookup, reachability and the address
//! singletons behind one object. `any_local_address` is always IPv6 and the
//! loopback answer always carries both families.

use crate::base::config::HostprobeConfig;
use crate::base::neterror::{NetError, UnresolvedHost};
use crate::dns::{AddrInfo, AddressCache, HostResolver};
use crate::inet::{InetAddress, NetworkInterface, SingletonAddressProvider};
use crate::reach::{ReachabilityProber, SocketOps};
use std::{net::IpAddr, sync::Arc, time::Duration};

#[derive(Debug, Clone)]
pub struct DualStackImpl {
    resolver: HostResolver,
    prober: ReachabilityProber,
    singletons: &'static SingletonAddressProvider,
}

impl DualStackImpl {
    /// Assembles an implementation from explicit backends.
    pub fn new(
        addrinfo: Arc<dyn AddrInfo>,
        sockets: Arc<dyn SocketOps>,
        config: HostprobeConfig,
    ) -> Self {
        Self {
            resolver: HostResolver::with_cache(addrinfo, AddressCache::with_config(config.cache)),
            prober: ReachabilityProber::new(sockets, config.probe),
            singletons: SingletonAddressProvider::global(),
        }
    }

    /// `getaddrinfo` resolution and `socket2` probing.
    pub fn system(config: HostprobeConfig) -> Self {
        Self {
            resolver: HostResolver::system(config.cache),
            prober: ReachabilityProber::system(config.probe),
            singletons: SingletonAddressProvider::global(),
        }
    }

    /// Use `provider` for the address singletons.
    pub fn with_singletons(mut self, provider: &'static SingletonAddressProvider) -> Self {
        self.resolver = self.resolver.with_singletons(provider);
        self.singletons = provider;
        self
    }

    pub fn resolver(&self) -> &HostResolver {
        &self.resolver
    }

    pub fn prober(&self) -> &ReachabilityProber {
        &self.prober
    }

    pub fn lookup_all_host_addr(
        &self,
        host: Option<&str>,
        net_id: u32,
    ) -> Result<Arc<[InetAddress]>, UnresolvedHost> {
        self.resolver.lookup_all_host_addr(host, net_id)
    }

    pub fn get_host_by_addr(&self, ip: IpAddr) -> Result<String, UnresolvedHost> {
        self.resolver.get_host_by_addr(ip)
    }

    pub fn clear_address_cache(&self) {
        self.resolver.clear_address_cache();
    }

    pub fn is_reachable(
        &self,
        addr: &InetAddress,
        timeout: Duration,
        netif: Option<&NetworkInterface>,
        ttl: u32,
    ) -> Result<bool, NetError> {
        self.prober.probe(addr.ip(), timeout, netif, ttl)
    }

    pub fn any_local_address(&self) -> Arc<InetAddress> {
        self.singletons.any_local_address()
    }

    pub fn loopback_addresses(&self) -> Arc<[InetAddress]> {
        self.singletons.loopback_addresses()
    }
}
