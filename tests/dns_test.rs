//! DNS Module Tests
//!
//! Covers:
//! - `HostResolver` caching against a scripted `AddrInfo`
//! - `AddressCache` concurrency
//! - `Resolve` async adapter
//! - `SystemAddrInfo` (basic system resolver)

use hostprobe::base::config::CacheConfig;
use hostprobe::dns::{
    AddrInfo, AddrInfoHints, AddressCache, CacheEntry, GaiError, HostResolver, Name, Resolve,
    SystemAddrInfo,
};

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};
use std::time::Duration;

const EAI_NONAME: i32 = -2;

#[derive(Default)]
struct ScriptedAddrInfo {
    answers: Mutex<HashMap<String, Result<Vec<IpAddr>, GaiError>>>,
    calls: AtomicUsize,
}

impl ScriptedAddrInfo {
    fn answer(&self, host: &str, result: Result<Vec<IpAddr>, GaiError>) {
        self.answers.lock().unwrap().insert(host.to_string(), result);
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AddrInfo for ScriptedAddrInfo {
    fn getaddrinfo(
        &self,
        host: &str,
        _hints: &AddrInfoHints,
        _net_id: u32,
    ) -> Result<Vec<IpAddr>, GaiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answers
            .lock()
            .unwrap()
            .get(host)
            .cloned()
            .unwrap_or_else(|| Err(GaiError::new(EAI_NONAME, "Name or service not known")))
    }

    fn getnameinfo(&self, _ip: IpAddr, _flags: i32) -> Result<String, GaiError> {
        Err(GaiError::new(EAI_NONAME, "Name or service not known"))
    }
}

fn v4(a: u8, b: u8, c: u8, d: u8) -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(a, b, c, d))
}

#[test]
fn test_lookup_scenario_preserves_order_and_tags() {
    let backend = Arc::new(ScriptedAddrInfo::default());
    backend.answer(
        "example.test",
        Ok(vec![v4(1, 2, 3, 4), IpAddr::V6(Ipv6Addr::LOCALHOST)]),
    );
    let resolver = HostResolver::new(backend.clone());

    let addrs = resolver
        .lookup_all_host_addr(Some("example.test"), 0)
        .unwrap();

    assert_eq!(addrs.len(), 2);
    assert_eq!(addrs[0].ip(), v4(1, 2, 3, 4));
    assert_eq!(addrs[1].ip(), IpAddr::V6(Ipv6Addr::LOCALHOST));
    assert!(addrs
        .iter()
        .all(|a| a.host_name() == Some("example.test")
            && a.original_host_name() == Some("example.test")));

    match resolver.cache().get("example.test", 0) {
        Some(CacheEntry::Positive(cached)) => assert_eq!(&cached[..], &addrs[..]),
        other => panic!("Expected cached positive entry, got {:?}", other),
    }
}

#[test]
fn test_cache_hit_skips_backend() {
    let backend = Arc::new(ScriptedAddrInfo::default());
    backend.answer("a.test", Ok(vec![v4(10, 0, 0, 1)]));
    let resolver = HostResolver::new(backend.clone());

    for _ in 0..5 {
        let addrs = resolver.lookup_all_host_addr(Some("a.test"), 42).unwrap();
        assert_eq!(addrs[0].host_name(), Some("a.test"));
    }
    assert_eq!(backend.calls(), 1);
}

#[test]
fn test_numeric_literals_never_touch_cache() {
    let backend = Arc::new(ScriptedAddrInfo::default());
    let resolver = HostResolver::new(backend.clone());

    for (literal, expected) in [
        ("192.0.2.7", v4(192, 0, 2, 7)),
        ("2001:db8::1", "2001:db8::1".parse().unwrap()),
        ("[2001:db8::1]", "2001:db8::1".parse().unwrap()),
    ] {
        let addrs = resolver.lookup_all_host_addr(Some(literal), 9).unwrap();
        assert_eq!(addrs.len(), 1);
        assert_eq!(addrs[0].ip(), expected);
    }

    assert_eq!(backend.calls(), 0);
    assert!(resolver.cache().is_empty());
}

#[test]
fn test_empty_and_missing_host_yield_loopback_pair() {
    let resolver = HostResolver::new(Arc::new(ScriptedAddrInfo::default()));

    for host in [None, Some("")] {
        let addrs = resolver.lookup_all_host_addr(host, 0).unwrap();
        let ips: Vec<_> = addrs.iter().map(|a| a.ip()).collect();
        assert_eq!(
            ips,
            vec![
                IpAddr::V6(Ipv6Addr::LOCALHOST),
                IpAddr::V4(Ipv4Addr::LOCALHOST)
            ]
        );
    }
}

#[test]
fn test_negative_cache_until_cleared() {
    let backend = Arc::new(ScriptedAddrInfo::default());
    let resolver = HostResolver::new(backend.clone());

    let first = resolver
        .lookup_all_host_addr(Some("missing.test"), 0)
        .unwrap_err();
    let second = resolver
        .lookup_all_host_addr(Some("missing.test"), 0)
        .unwrap_err();

    assert_eq!(
        first.message,
        "Unable to resolve host \"missing.test\": Name or service not known"
    );
    assert_eq!(first, second);
    assert_eq!(backend.calls(), 1);

    // The host comes into existence; only a cache clear makes it visible.
    backend.answer("missing.test", Ok(vec![v4(10, 9, 8, 7)]));
    assert!(resolver
        .lookup_all_host_addr(Some("missing.test"), 0)
        .is_err());

    resolver.clear_address_cache();
    let addrs = resolver
        .lookup_all_host_addr(Some("missing.test"), 0)
        .unwrap();
    assert_eq!(addrs[0].ip(), v4(10, 9, 8, 7));
    assert_eq!(backend.calls(), 2);
}

#[test]
fn test_negative_entry_expires_with_ttl() {
    let backend = Arc::new(ScriptedAddrInfo::default());
    let cache = AddressCache::with_config(CacheConfig::new().ttl(Duration::from_millis(30)));
    let resolver = HostResolver::with_cache(backend.clone(), cache);

    resolver
        .lookup_all_host_addr(Some("flaky.test"), 0)
        .unwrap_err();
    backend.answer("flaky.test", Ok(vec![v4(10, 0, 0, 5)]));

    std::thread::sleep(Duration::from_millis(60));
    let addrs = resolver.lookup_all_host_addr(Some("flaky.test"), 0).unwrap();
    assert_eq!(addrs[0].ip(), v4(10, 0, 0, 5));
    assert_eq!(backend.calls(), 2);
}

#[test]
fn test_concurrent_misses_all_succeed() {
    let backend = Arc::new(ScriptedAddrInfo::default());
    backend.answer("busy.test", Ok(vec![v4(10, 1, 1, 1)]));
    let resolver = HostResolver::new(backend.clone());
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let resolver = resolver.clone();
            let barrier = barrier.clone();
            std::thread::spawn(move || {
                barrier.wait();
                resolver.lookup_all_host_addr(Some("busy.test"), 0)
            })
        })
        .collect();

    for handle in handles {
        let addrs = handle.join().unwrap().unwrap();
        assert_eq!(addrs[0].ip(), v4(10, 1, 1, 1));
    }
    // Duplicate misses are allowed, but at least one call was made and the
    // cache settled on a positive entry.
    assert!(backend.calls() >= 1);
    assert!(matches!(
        resolver.cache().get("busy.test", 0),
        Some(CacheEntry::Positive(_))
    ));
}

#[tokio::test]
async fn test_async_resolve() {
    let backend = Arc::new(ScriptedAddrInfo::default());
    backend.answer("async.test", Ok(vec![v4(10, 2, 2, 2)]));
    let resolver: Arc<dyn Resolve> = Arc::new(HostResolver::new(backend.clone()));

    let addrs = resolver.resolve(Name::new("async.test")).await.unwrap();
    assert_eq!(addrs[0].ip(), v4(10, 2, 2, 2));

    let err = resolver.resolve(Name::new("nope.test")).await.unwrap_err();
    assert!(err.is_unresolved_host());
}

#[test]
fn test_system_resolver_numeric_and_invalid() {
    let resolver = HostResolver::new(Arc::new(SystemAddrInfo::new()));

    let addrs = resolver.lookup_all_host_addr(Some("127.0.0.1"), 0).unwrap();
    assert_eq!(addrs[0].ip(), v4(127, 0, 0, 1));

    let err = resolver
        .lookup_all_host_addr(Some("this-domain-definitely-does-not-exist.invalid"), 0)
        .unwrap_err();
    let reason = err
        .message
        .strip_prefix("Unable to resolve host \"this-domain-definitely-does-not-exist.invalid\": ")
        .expect("failure message names the host");
    assert!(!reason.is_empty());
    assert!(!reason.starts_with("failed to lookup address information"));
}
