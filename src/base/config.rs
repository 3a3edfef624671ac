//! Resolver cache and reachability probe configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Address cache configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Lifetime of both positive and negative entries
    #[serde(with = "duration_ms")]
    pub ttl: Duration,
    /// Maximum number of cached `(host, netId)` keys
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(2),
            max_entries: 16,
        }
    }
}

impl CacheConfig {
    /// Create a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set entry time-to-live.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the entry bound.
    pub fn max_entries(mut self, max: usize) -> Self {
        self.max_entries = max;
        self
    }
}

/// Reachability probe configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// TCP port used by the connect fallback (echo protocol)
    pub echo_port: u16,
    /// Longest wait for a single ICMP echo reply
    #[serde(with = "duration_ms")]
    pub slice: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            echo_port: 7,
            slice: Duration::from_millis(1000),
        }
    }
}

impl ProbeConfig {
    /// Create a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the TCP fallback port.
    pub fn echo_port(mut self, port: u16) -> Self {
        self.echo_port = port;
        self
    }

    /// Set the per-request ICMP wait. Waits shorter than 1 ms are raised to 1 ms.
    pub fn slice(mut self, slice: Duration) -> Self {
        self.slice = slice;
        self
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostprobeConfig {
    pub cache: CacheConfig,
    pub probe: ProbeConfig,
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HostprobeConfig::default();
        assert_eq!(config.cache.ttl, Duration::from_secs(2));
        assert_eq!(config.cache.max_entries, 16);
        assert_eq!(config.probe.echo_port, 7);
        assert_eq!(config.probe.slice, Duration::from_millis(1000));
    }

    #[test]
    fn test_builder_pattern() {
        let cache = CacheConfig::new()
            .ttl(Duration::from_millis(250))
            .max_entries(4);
        let probe = ProbeConfig::new().echo_port(7007);

        assert_eq!(cache.ttl, Duration::from_millis(250));
        assert_eq!(cache.max_entries, 4);
        assert_eq!(probe.echo_port, 7007);
        assert_eq!(probe.slice, Duration::from_millis(1000));
    }

    #[test]
    fn test_deserialize_partial_json() {
        let config: HostprobeConfig =
            serde_json::from_str(r#"{"cache": {"ttl": 5000}, "probe": {"slice": 200}}"#).unwrap();

        assert_eq!(config.cache.ttl, Duration::from_secs(5));
        assert_eq!(config.cache.max_entries, 16);
        assert_eq!(config.probe.slice, Duration::from_millis(200));
        assert_eq!(config.probe.echo_port, 7);
    }

    #[test]
    fn test_serialize_as_millis() {
        let json = serde_json::to_value(CacheConfig::default()).unwrap();
        assert_eq!(json["ttl"], 2000);
    }
}
