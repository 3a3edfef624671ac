//! Async DNS resolution types and traits.
//!
//! The resolver core is blocking. This module defines the `Resolve` trait
//! that async callers use, and implements it for [`HostResolver`] by running
//! each lookup on tokio's blocking pool.

use super::lookup::HostResolver;
use crate::base::neterror::NetError;
use crate::inet::InetAddress;
use std::{fmt, future::Future, pin::Pin, sync::Arc};

/// A hostname to resolve, plus the network to resolve it on.
#[derive(Clone, Hash, Eq, PartialEq)]
pub struct Name {
    host: Box<str>,
    net_id: u32,
}

impl Name {
    /// Creates a [`Name`] on the default network (`0`).
    #[inline]
    pub fn new(host: impl Into<Box<str>>) -> Self {
        Self::on_network(host, 0)
    }

    /// Creates a [`Name`] bound to network `net_id`.
    #[inline]
    pub fn on_network(host: impl Into<Box<str>>, net_id: u32) -> Self {
        Self {
            host: host.into(),
            net_id,
        }
    }

    /// View the hostname as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.host
    }

    #[inline]
    pub fn net_id(&self) -> u32 {
        self.net_id
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Name::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Name::new(value)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}", self.host, self.net_id)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.host, f)
    }
}

/// Resolved addresses, in backend order.
pub type Addrs = Arc<[InetAddress]>;

/// Alias for the `Future` type returned by a DNS resolver.
pub type Resolving = Pin<Box<dyn Future<Output = Result<Addrs, NetError>> + Send>>;

/// Trait for async DNS resolution.
///
/// - Uses `&self` so one resolver serves concurrent lookups.
/// - Returns boxed futures for trait object compatibility.
pub trait Resolve: Send + Sync {
    fn resolve(&self, name: Name) -> Resolving;
}

/// Blanket implementation for Arc-wrapped resolvers.
impl<R: Resolve + ?Sized> Resolve for Arc<R> {
    fn resolve(&self, name: Name) -> Resolving {
        (**self).resolve(name)
    }
}

impl Resolve for HostResolver {
    fn resolve(&self, name: Name) -> Resolving {
        let resolver = self.clone();
        Box::pin(async move {
            let result = tokio::task::spawn_blocking(move || {
                resolver.lookup_all_host_addr(Some(name.as_str()), name.net_id())
            })
            .await;

            // Handle task join error (cancellation, panic)
            let addrs = result.map_err(|e| {
                tracing::error!(error = %e, "DNS resolution task failed");
                NetError::TaskFailed(e.to_string())
            })??;
            Ok(addrs)
        })
    }
}
