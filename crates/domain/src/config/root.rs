use serde::{Deserialize, Serialize};

use super::cache::CacheConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::resolver::ResolverConfig;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Iterative walk and upstream settings
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Answer cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values the CLI may override on top of the loaded file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub query_timeout_ms: Option<u64>,
    pub cache_ttl: Option<u32>,
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration from file or use defaults.
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. rootwalk.toml in current directory
    /// 3. /etc/rootwalk/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("rootwalk.toml").exists() {
            Self::from_file("rootwalk.toml")?
        } else if std::path::Path::new("/etc/rootwalk/config.toml").exists() {
            Self::from_file("/etc/rootwalk/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(timeout) = overrides.query_timeout_ms {
            self.resolver.query_timeout_ms = timeout;
        }
        if let Some(ttl) = overrides.cache_ttl {
            self.cache.ttl = ttl;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolver.root_servers.is_empty() {
            return Err(ConfigError::Validation(
                "No bootstrap servers configured".to_string(),
            ));
        }
        if self.resolver.upstream_servers.is_empty() {
            return Err(ConfigError::Validation(
                "No upstream servers configured".to_string(),
            ));
        }
        if self.resolver.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "query_timeout_ms cannot be 0".to_string(),
            ));
        }
        if self.resolver.overall_deadline_ms < self.resolver.query_timeout_ms {
            return Err(ConfigError::Validation(
                "overall_deadline_ms cannot be smaller than query_timeout_ms".to_string(),
            ));
        }
        if self.resolver.max_cname_hops == 0 || self.resolver.max_referral_hops == 0 {
            return Err(ConfigError::Validation(
                "Hop limits cannot be 0".to_string(),
            ));
        }

        for server in self
            .resolver
            .root_servers
            .iter()
            .chain(self.resolver.upstream_servers.iter())
        {
            if server.parse::<std::net::SocketAddr>().is_err() {
                return Err(ConfigError::Validation(format!(
                    "Invalid server address '{server}' (expected ip:port)"
                )));
            }
        }

        Ok(())
    }
}
