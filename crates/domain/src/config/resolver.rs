use serde::{Deserialize, Serialize};

/// Iterative resolution configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Bootstrap server set for the iterative walk. Every walk (and every
    /// CNAME re-entry) starts from these addresses.
    #[serde(default = "default_root_servers")]
    pub root_servers: Vec<String>,

    /// Per-attempt transport timeout in milliseconds
    #[serde(default = "default_query_timeout")]
    pub query_timeout_ms: u64,

    /// Deadline for a whole resolution (all referral and CNAME hops)
    #[serde(default = "default_overall_deadline")]
    pub overall_deadline_ms: u64,

    /// CNAME indirection bound
    #[serde(default = "default_max_cname_hops")]
    pub max_cname_hops: u32,

    /// Referral depth bound for one walk
    #[serde(default = "default_max_referral_hops")]
    pub max_referral_hops: u32,

    /// Full-service resolvers for the recursive shim
    #[serde(default = "default_upstream_servers")]
    pub upstream_servers: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            root_servers: default_root_servers(),
            query_timeout_ms: default_query_timeout(),
            overall_deadline_ms: default_overall_deadline(),
            max_cname_hops: default_max_cname_hops(),
            max_referral_hops: default_max_referral_hops(),
            upstream_servers: default_upstream_servers(),
        }
    }
}

fn default_root_servers() -> Vec<String> {
    // IANA root hints, a.root-servers.net through m.root-servers.net
    [
        "198.41.0.4",
        "199.9.14.201",
        "192.33.4.12",
        "199.7.91.13",
        "192.203.230.10",
        "192.5.5.241",
        "192.112.36.4",
        "198.97.190.53",
        "192.36.148.17",
        "192.58.128.30",
        "193.0.14.129",
        "199.7.83.42",
        "202.12.27.33",
    ]
    .iter()
    .map(|ip| format!("{ip}:53"))
    .collect()
}

fn default_query_timeout() -> u64 {
    2000
}

fn default_overall_deadline() -> u64 {
    15000
}

fn default_max_cname_hops() -> u32 {
    8
}

fn default_max_referral_hops() -> u32 {
    16
}

fn default_upstream_servers() -> Vec<String> {
    vec!["8.8.8.8:53".to_string(), "1.1.1.1:53".to_string()]
}
