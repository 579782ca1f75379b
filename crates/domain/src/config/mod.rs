//! Configuration structures, organized by concern:
//! - `root`: main configuration, load order and CLI overrides
//! - `resolver`: iterative walk and upstream settings
//! - `cache`: answer cache sizing and TTL policy
//! - `logging`: logging settings
//! - `errors`: configuration errors

pub mod cache;
pub mod errors;
pub mod logging;
pub mod resolver;
pub mod root;

pub use cache::CacheConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use resolver::ResolverConfig;
pub use root::{CliOverrides, Config};
