//! # rootwalk
//!
//! Resolve a domain by walking the DNS delegation hierarchy directly,
//! with an optional recursive-upstream comparison path.

mod bootstrap;
mod di;

use clap::{Parser, ValueEnum};
use rootwalk_application::ports::{DnsResolution, DnsResolver};
use rootwalk_application::ResolveQuery;
use rootwalk_domain::{CliOverrides, DomainError, RecordType};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Iterative,
    Recursive,
    Both,
}

#[derive(Parser)]
#[command(name = "rootwalk")]
#[command(version)]
#[command(about = "Iterative DNS resolver that walks the delegation hierarchy itself")]
struct Cli {
    /// Domain name to resolve
    domain: String,

    /// Record type to query for
    #[arg(short = 't', long, default_value = "A")]
    record_type: String,

    /// Resolution path
    #[arg(short = 'm', long, value_enum, default_value_t = Mode::Iterative)]
    mode: Mode,

    /// Configuration file path
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Per-attempt transport timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Cache TTL override in seconds
    #[arg(long)]
    cache_ttl: Option<u32>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Emit the result as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        query_timeout_ms: cli.timeout_ms,
        cache_ttl: cli.cache_ttl,
        log_level: cli.log_level.clone(),
    };
    let config = bootstrap::config::load_config(cli.config.as_deref(), overrides)?;
    bootstrap::logging::init_logging(&config);

    tracing::debug!(
        config_file = cli.config.as_deref().unwrap_or("default"),
        root_servers = config.resolver.root_servers.len(),
        cache_enabled = config.cache.enabled,
        cache_ttl = config.cache.ttl,
        "Configuration loaded"
    );

    let record_type: RecordType = cli
        .record_type
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let resolvers = di::build_resolvers(&config)?;

    let failed = match cli.mode {
        Mode::Iterative => !run_one("iterative", &resolvers.iterative, &cli, record_type).await,
        Mode::Recursive => !run_one("recursive", &resolvers.recursive, &cli, record_type).await,
        Mode::Both => {
            let iter_ok = run_one("iterative", &resolvers.iterative, &cli, record_type).await;
            let recur_ok = run_one("recursive", &resolvers.recursive, &cli, record_type).await;
            !(iter_ok || recur_ok)
        }
    };

    if let Some(cache) = &resolvers.cache {
        let stats = cache.stats();
        tracing::debug!(
            entries = stats.entries,
            hits = stats.hits,
            misses = stats.misses,
            "Answer cache stats"
        );
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

async fn run_one(
    label: &str,
    resolver: &Arc<dyn DnsResolver>,
    cli: &Cli,
    record_type: RecordType,
) -> bool {
    let use_case = ResolveQuery::new(Arc::clone(resolver));

    match use_case.execute(&cli.domain, Some(record_type)).await {
        Ok(resolution) => {
            print_resolution(label, &resolution, cli);
            true
        }
        Err(error) => {
            print_failure(label, &error, cli);
            false
        }
    }
}

fn print_resolution(label: &str, resolution: &DnsResolution, cli: &Cli) {
    if cli.json {
        let value = serde_json::json!({
            "resolver": label,
            "name": &**resolution.rrset.name(),
            "record_type": resolution.rrset.record_type().as_str(),
            "values": resolution.rrset.values(),
            "ttl": resolution.rrset.min_ttl(),
            "cache_hit": resolution.cache_hit,
            "server": resolution.server.as_deref(),
        });
        println!("{value}");
        return;
    }

    let origin = if resolution.cache_hit {
        "cache".to_string()
    } else {
        resolution
            .server
            .as_deref()
            .unwrap_or("unknown")
            .to_string()
    };
    for value in resolution.rrset.values() {
        println!("{label}: {value}  (from {origin})");
    }
}

fn print_failure(label: &str, error: &DomainError, cli: &Cli) {
    if cli.json {
        let value = serde_json::json!({
            "resolver": label,
            "error": error.to_string(),
        });
        println!("{value}");
    } else {
        eprintln!("{label}: resolution failed: {error}");
    }
}
