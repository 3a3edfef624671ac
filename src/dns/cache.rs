//! Positive/negative address cache keyed by `(hostname, netId)`.
//!
//! Entries expire after [`CacheConfig::ttl`] and the cache holds at most
//! [`CacheConfig::max_entries`] keys. Lookups never block on network I/O;
//! callers populate the cache after their external lookup returns.

use crate::base::config::CacheConfig;
use crate::inet::InetAddress;
use dashmap::DashMap;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

/// Cache key. Both fields take part in equality and hashing.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct CacheKey {
    pub host: String,
    pub net_id: u32,
}

impl CacheKey {
    pub fn new(host: impl Into<String>, net_id: u32) -> Self {
        Self {
            host: host.into(),
            net_id,
        }
    }
}

/// A cached lookup outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEntry {
    /// Addresses returned by a successful lookup.
    Positive(Arc<[InetAddress]>),
    /// Detail message of a failed lookup.
    Negative(Arc<str>),
}

#[derive(Debug)]
struct Slot {
    entry: CacheEntry,
    inserted_at: Instant,
    /// `None` when the TTL runs past what `Instant` can represent.
    expires_at: Option<Instant>,
}

impl Slot {
    fn new(entry: CacheEntry, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            entry,
            inserted_at: now,
            expires_at: now.checked_add(ttl),
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// Thread-safe address cache.
///
/// Cloning is cheap; clones share the same entries.
#[derive(Clone, Debug)]
pub struct AddressCache {
    entries: Arc<DashMap<CacheKey, Slot>>,
    config: CacheConfig,
}

impl Default for AddressCache {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressCache {
    /// Create a cache with the default TTL and bound.
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            config,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Returns the live entry for `(host, net_id)`, if any.
    pub fn get(&self, host: &str, net_id: u32) -> Option<CacheEntry> {
        let key = CacheKey::new(host, net_id);
        let slot = self.entries.get(&key)?;
        if slot.is_expired(Instant::now()) {
            return None;
        }
        Some(slot.entry.clone())
    }

    /// Stores a positive result, replacing any previous entry for the key.
    pub fn put(&self, host: &str, net_id: u32, addresses: Arc<[InetAddress]>) {
        self.insert(CacheKey::new(host, net_id), CacheEntry::Positive(addresses));
    }

    /// Stores a negative result carrying the failure detail message.
    pub fn put_unknown_host(&self, host: &str, net_id: u32, reason: impl Into<Arc<str>>) {
        self.insert(CacheKey::new(host, net_id), CacheEntry::Negative(reason.into()));
    }

    /// Drops every entry, e.g. after a network configuration change.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of stored entries, expired ones included until evicted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&self, key: CacheKey, entry: CacheEntry) {
        if self.config.max_entries == 0 {
            return;
        }
        if !self.entries.contains_key(&key) && self.entries.len() >= self.config.max_entries {
            self.evict();
        }
        self.entries.insert(key, Slot::new(entry, self.config.ttl));
    }

    /// Makes room for one insert: purge expired entries, then the oldest.
    fn evict(&self) {
        let now = Instant::now();
        self.entries.retain(|_, slot| !slot.is_expired(now));

        while self.entries.len() >= self.config.max_entries {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|slot| slot.inserted_at)
                .map(|slot| slot.key().clone());
            match oldest {
                Some(key) => {
                    tracing::trace!(host = %key.host, net_id = key.net_id, "evicting oldest cache entry");
                    self.entries.remove(&key);
                }
                None => break,
            }
        }
    }
}
