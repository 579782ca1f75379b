#![allow(dead_code)]

pub mod mock_nameserver;

pub use mock_nameserver::{Behavior, MockNameServer};

use rootwalk_domain::Config;

/// Config pointed at loopback servers, with timeouts short enough for a
/// test run. The same servers double as recursive upstreams.
pub fn flow_config(servers: Vec<String>) -> Config {
    let mut config = Config::default();
    config.resolver.root_servers = servers.clone();
    config.resolver.upstream_servers = servers;
    config.resolver.query_timeout_ms = 500;
    config.resolver.overall_deadline_ms = 5000;
    config.cache.enabled = false;
    config
}

/// A loopback ip:port that nothing listens on. Bind-then-drop, so the
/// kernel answers queries with ICMP port unreachable.
pub fn refused_addr() -> String {
    let socket = std::net::UdpSocket::bind("127.0.0.1:0").expect("bind probe socket");
    let addr = socket.local_addr().expect("local addr");
    drop(socket);
    addr.to_string()
}
