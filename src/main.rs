use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tricache::config::{CliArgs, NodeConfig};

fn init_tracing(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    match format {
        "json" => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        "pretty" => tracing_subscriber::fmt().pretty().with_env_filter(filter).init(),
        _ => tracing_subscriber::fmt().compact().with_env_filter(filter).init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_tracing(&args.log_level, &args.log_format);

    let config = NodeConfig::try_from(&args).context("invalid configuration")?;
    tricache::node::run(config).await
}
