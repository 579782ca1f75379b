use serde::{Deserialize, Serialize};

/// Answer cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Fixed TTL in seconds applied to every entry (compatibility default)
    #[serde(default = "default_cache_ttl")]
    pub ttl: u32,

    /// Use each RRset's own minimum record TTL instead of the fixed TTL
    #[serde(default = "default_false")]
    pub honor_record_ttl: bool,

    /// Upper clamp for record TTLs when `honor_record_ttl` is set
    #[serde(default = "default_max_record_ttl")]
    pub max_record_ttl: u32,

    #[serde(default = "default_cache_max_entries")]
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: default_cache_ttl(),
            honor_record_ttl: false,
            max_record_ttl: default_max_record_ttl(),
            max_entries: default_cache_max_entries(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

fn default_cache_ttl() -> u32 {
    300
}

fn default_max_record_ttl() -> u32 {
    86400
}

fn default_cache_max_entries() -> usize {
    10_000
}
