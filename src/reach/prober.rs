use super::icmp::icmp_echo;
use super::sockets::{SocketOps, SystemSockets};
use super::tcp::tcp_echo;
use crate::base::config::ProbeConfig;
use crate::base::neterror::NetError;
use crate::inet::NetworkInterface;
use std::{fmt, net::IpAddr, sync::Arc, time::Duration};

/// Host reachability test: ICMP echo first, TCP connect as fallback.
///
/// Both stages share the caller's timeout: ICMP spends it in per-request
/// slices, then the TCP connect gets the full timeout again.
#[derive(Clone)]
pub struct ReachabilityProber {
    sockets: Arc<dyn SocketOps>,
    config: ProbeConfig,
}

impl ReachabilityProber {
    pub fn new(sockets: Arc<dyn SocketOps>, config: ProbeConfig) -> Self {
        Self { sockets, config }
    }

    /// Prober over real `socket2` sockets.
    pub fn system(config: ProbeConfig) -> Self {
        Self::new(Arc::new(SystemSockets::new()), config)
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Tests whether `addr` answers within `timeout`.
    ///
    /// With `netif`, probes are sent from its first address of `addr`'s
    /// family; if it has none the host is reported unreachable. A `ttl` of
    /// zero leaves the system default. `Ok(false)` means "not reachable";
    /// errors are reserved for failing to set up the TCP probe socket.
    pub fn probe(
        &self,
        addr: IpAddr,
        timeout: Duration,
        netif: Option<&NetworkInterface>,
        ttl: u32,
    ) -> Result<bool, NetError> {
        let source = match netif {
            Some(netif) => match netif.source_for(&addr) {
                Some(source) => Some(source),
                None => {
                    tracing::debug!(
                        addr = %addr,
                        netif = %netif.name(),
                        "interface has no address of the target family"
                    );
                    return Ok(false);
                }
            },
            None => None,
        };

        if icmp_echo(
            self.sockets.as_ref(),
            addr,
            timeout,
            source,
            ttl,
            self.config.slice,
        ) {
            return Ok(true);
        }

        tcp_echo(
            self.sockets.as_ref(),
            addr,
            self.config.echo_port,
            timeout,
            source,
            ttl,
        )
    }

    /// Async form of [`probe`](Self::probe), run on tokio's blocking pool.
    pub async fn is_reachable(
        &self,
        addr: IpAddr,
        timeout: Duration,
        netif: Option<NetworkInterface>,
        ttl: u32,
    ) -> Result<bool, NetError> {
        let prober = self.clone();
        tokio::task::spawn_blocking(move || prober.probe(addr, timeout, netif.as_ref(), ttl))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "reachability task failed");
                NetError::TaskFailed(e.to_string())
            })?
    }
}

impl fmt::Debug for ReachabilityProber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReachabilityProber")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
