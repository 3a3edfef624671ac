//! Address types shared by the resolver and the prober.

mod address;
mod singleton;

pub use address::{parse_numeric_address, Family, InetAddress, NetworkInterface};
pub use singleton::SingletonAddressProvider;
