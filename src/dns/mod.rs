//! DNS Resolution Module
//!
//! Hostname lookups for both address families with a positive/negative
//! cache keyed by `(hostname, netId)`:
//! - [`AddressCache`]: bounded, expiring result cache
//! - [`HostResolver`]: literal/loopback shortcuts, cache, then backend
//! - [`AddrInfo`]: the `getaddrinfo`/`getnameinfo` capability, with
//!   [`SystemAddrInfo`] as the platform implementation
//!
//! # Example
//!
//! ```rust,ignore
//! use hostprobe::base::config::CacheConfig;
//! use hostprobe::dns::HostResolver;
//!
//! let resolver = HostResolver::system(CacheConfig::default());
//! for addr in resolver.lookup_all_host_addr(Some("example.com"), 0)?.iter() {
//!     println!("Resolved: {}", addr);
//! }
//! ```

mod addrinfo;
mod cache;
mod gai;
mod lookup;
mod resolve;

pub use addrinfo::{AddrInfo, AddrInfoHints, GaiError, NI_NAMEREQD};
pub use cache::{AddressCache, CacheEntry, CacheKey};
pub use gai::SystemAddrInfo;
pub use lookup::HostResolver;
pub use resolve::{Addrs, Name, Resolve, Resolving};
