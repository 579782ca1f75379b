//! Resolver implementations behind the `DnsResolver` port.
//!
//! Decorator layout: the cache layer wraps either core.
//!
//! - `IterativeResolver`: the delegation walk (the real engine)
//! - `RecursiveResolver`: shim that asks a full-service upstream
//! - `CachedResolver`: answer-cache decorator over any resolver

pub mod builder;
pub mod cache_layer;
pub mod iterative;
pub mod recursive;

pub use builder::ResolverBuilder;
pub use cache_layer::CachedResolver;
pub use iterative::{IterativeResolver, IterativeSettings};
pub use recursive::RecursiveResolver;
