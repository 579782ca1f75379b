//! Rootwalk application layer: ports and use cases.
pub mod ports;
pub mod use_cases;

pub use ports::{DnsResolution, DnsResolver};
pub use use_cases::ResolveQuery;
