use std::{io, sync::Arc};
use thiserror::Error;

/// Hostname resolution failure.
///
/// Produced both for fresh `getaddrinfo` failures and for cached negative
/// results; in both cases `message` is the exact text that was cached.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct UnresolvedHost {
    pub message: String,
}

impl UnresolvedHost {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Crate-wide error.
#[derive(Debug, Error, Clone)]
pub enum NetError {
    #[error("{0}")]
    UnresolvedHost(#[from] UnresolvedHost),
    #[error("Socket {op} failed: {source}")]
    SocketSetup {
        op: &'static str,
        #[source]
        source: Arc<io::Error>,
    },
    #[error("Blocking task failed: {0}")]
    TaskFailed(String),
}

impl NetError {
    /// Wraps an I/O error raised while preparing a probe socket.
    pub fn socket_setup(op: &'static str, source: io::Error) -> Self {
        NetError::SocketSetup {
            op,
            source: Arc::new(source),
        }
    }

    /// Returns true for resolution failures, as opposed to I/O-layer failures.
    pub fn is_unresolved_host(&self) -> bool {
        matches!(self, NetError::UnresolvedHost(_))
    }
}
