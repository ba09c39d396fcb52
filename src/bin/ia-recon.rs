use anyhow::Result;
use clap::Parser;
use ia_recon::config::{ServiceConfig, DEFAULT_BIND, DEFAULT_SEARCH_URL, DEFAULT_TIMEOUT_SECS};
use ia_recon::server;
use std::net::SocketAddr;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// OpenRefine reconciliation endpoint for the Internet Archive.
#[derive(Debug, Parser)]
#[command(name = "ia-recon", version)]
struct Cli {
    /// Verbose logging (per-request URLs, statuses and candidate scores)
    #[arg(short, long)]
    debug: bool,

    /// Address to listen on
    #[arg(long, default_value = DEFAULT_BIND)]
    bind: SocketAddr,

    /// Archive advanced-search endpoint
    #[arg(long, default_value = DEFAULT_SEARCH_URL)]
    search_url: String,

    /// Timeout for each archive request, in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
}

impl Cli {
    fn into_config(self) -> ServiceConfig {
        ServiceConfig {
            bind: self.bind,
            search_url: self.search_url,
            timeout: Duration::from_secs(self.timeout_secs),
            debug: self.debug,
        }
    }
}

fn init_tracing(debug: bool) {
    let default_filter = if debug { "ia_recon=debug,info" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Cli::parse().into_config();
    init_tracing(config.debug);
    server::serve(config).await
}
