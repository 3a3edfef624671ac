//! Cache-backed dual-stack hostname resolution.

use super::addrinfo::{AddrInfo, AddrInfoHints, NI_NAMEREQD};
use super::cache::{AddressCache, CacheEntry};
use super::gai::SystemAddrInfo;
use crate::base::config::CacheConfig;
use crate::base::neterror::UnresolvedHost;
use crate::inet::{parse_numeric_address, InetAddress, SingletonAddressProvider};
use std::{fmt, net::IpAddr, sync::Arc};

/// Resolves hostnames to every address of both families.
///
/// Successful and failed lookups are both cached per `(host, netId)`. The
/// cache is consulted and filled outside the blocking backend call, so
/// concurrent misses on the same key may each reach the backend; the last
/// one to finish wins, which is fine because lookups are idempotent.
#[derive(Clone)]
pub struct HostResolver {
    backend: Arc<dyn AddrInfo>,
    cache: AddressCache,
    singletons: &'static SingletonAddressProvider,
}

impl HostResolver {
    /// Creates a resolver over `backend` with a default cache.
    pub fn new(backend: Arc<dyn AddrInfo>) -> Self {
        Self::with_cache(backend, AddressCache::new())
    }

    pub fn with_cache(backend: Arc<dyn AddrInfo>, cache: AddressCache) -> Self {
        Self {
            backend,
            cache,
            singletons: SingletonAddressProvider::global(),
        }
    }

    /// System `getaddrinfo` resolver.
    pub fn system(config: CacheConfig) -> Self {
        Self::with_cache(
            Arc::new(SystemAddrInfo::new()),
            AddressCache::with_config(config),
        )
    }

    /// Use `provider` for the loopback answer to empty hostnames.
    pub fn with_singletons(mut self, provider: &'static SingletonAddressProvider) -> Self {
        self.singletons = provider;
        self
    }

    pub fn cache(&self) -> &AddressCache {
        &self.cache
    }

    /// Looks up all addresses of `host` on network `net_id`.
    ///
    /// - `None` or `""` yields the IPv6 and IPv4 loopback addresses.
    /// - A numeric literal (brackets allowed around IPv6) yields itself.
    /// - Anything else goes through the cache and then the backend.
    pub fn lookup_all_host_addr(
        &self,
        host: Option<&str>,
        net_id: u32,
    ) -> Result<Arc<[InetAddress]>, UnresolvedHost> {
        let host = match host {
            None | Some("") => return Ok(self.singletons.loopback_addresses()),
            Some(host) => host,
        };

        if let Some(ip) = parse_numeric_address(host) {
            return Ok(Arc::from(vec![InetAddress::new(ip)]));
        }

        self.lookup_host_by_name(host, net_id)
    }

    fn lookup_host_by_name(
        &self,
        host: &str,
        net_id: u32,
    ) -> Result<Arc<[InetAddress]>, UnresolvedHost> {
        match self.cache.get(host, net_id) {
            Some(CacheEntry::Positive(addrs)) => {
                tracing::trace!(host = %host, net_id, "address cache hit");
                return Ok(addrs);
            }
            Some(CacheEntry::Negative(reason)) => {
                tracing::trace!(host = %host, net_id, "negative address cache hit");
                return Err(UnresolvedHost::new(&*reason));
            }
            None => {}
        }

        let result = self
            .backend
            .getaddrinfo(host, &AddrInfoHints::dual_stack(), net_id)
            .map_err(|e| e.message)
            .and_then(|ips| {
                if ips.is_empty() {
                    Err("No address associated with hostname".to_string())
                } else {
                    Ok(ips)
                }
            });

        match result {
            Ok(ips) => {
                let addrs: Arc<[InetAddress]> = ips
                    .into_iter()
                    .map(|ip| InetAddress::with_host(ip, host))
                    .collect();
                tracing::debug!(host = %host, net_id, count = addrs.len(), "resolution complete");
                self.cache.put(host, net_id, addrs.clone());
                Ok(addrs)
            }
            Err(reason) => {
                let message = format!("Unable to resolve host \"{}\": {}", host, reason);
                tracing::debug!(host = %host, net_id, error = %reason, "resolution failed");
                self.cache.put_unknown_host(host, net_id, message.as_str());
                Err(UnresolvedHost::new(message))
            }
        }
    }

    /// Reverse lookup of `ip`. Requires a real name; results are not cached.
    pub fn get_host_by_addr(&self, ip: IpAddr) -> Result<String, UnresolvedHost> {
        self.backend.getnameinfo(ip, NI_NAMEREQD).map_err(|e| {
            tracing::debug!(ip = %ip, error = %e, "reverse resolution failed");
            UnresolvedHost::new(format!("/{}", ip))
        })
    }

    /// Forgets every cached lookup.
    pub fn clear_address_cache(&self) {
        self.cache.clear();
    }
}

impl fmt::Debug for HostResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostResolver")
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}
