pub mod cache;
pub mod message;
pub mod resolver;
pub mod transport;
