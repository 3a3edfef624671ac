//! Socket-step tagging for I/O errors.
//!
//! Probe socket setup runs several fallible calls in a row (open, TTL, bind).
//! [`IoResultExt::socket_context`] records which one failed as
//! [`NetError::SocketSetup`].

use crate::base::neterror::NetError;
use std::io;

/// Adds the failing socket step to `io::Result`s.
pub trait IoResultExt<T> {
    /// Tag an IO error with the socket operation that raised it.
    ///
    /// # Example
    /// ```ignore
    /// use hostprobe::base::context::IoResultExt;
    ///
    /// let socket = sockets.open(Family::V6, SocketKind::Stream)
    ///     .socket_context("open")?;
    /// // Error: "Socket open failed: permission denied"
    /// ```
    fn socket_context(self, op: &'static str) -> Result<T, NetError>;
}

impl<T> IoResultExt<T> for Result<T, io::Error> {
    fn socket_context(self, op: &'static str) -> Result<T, NetError> {
        self.map_err(|e| NetError::socket_setup(op, e))
    }
}
