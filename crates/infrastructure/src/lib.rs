//! Rootwalk infrastructure layer: wire format, transport, cache and the
//! resolver implementations behind the application port.
pub mod dns;
