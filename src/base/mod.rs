//! Base types and error handling.
//!
//! - [`NetError`](neterror::NetError): crate-wide error for lookup, socket setup and task failures
//! - [`UnresolvedHost`](neterror::UnresolvedHost): the only resolution failure kind
//! - [`config`]: cache and probe tuning

pub mod config;
pub mod context;
pub mod neterror;
