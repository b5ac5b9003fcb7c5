use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use zonedns::options::{Cli, Options, ServerConfig};
use zonedns::server::DnsServer;
use zonedns::zone::RecordStore;

fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()))
        .with_thread_names(true)
        .init();
}

async fn run(config: ServerConfig) -> anyhow::Result<()> {
    info!("Reading record file from {}", config.zone_file.display());
    let store = RecordStore::load(&config.zone_file).context("failed to load records")?;
    info!("Loaded records for {} names", store.len());

    let mut handle = DnsServer::bind(&config.listen_addr(), Arc::new(store))?
        .with_packet_dump(config.dump_packets)
        .start()?;

    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received SIGINT, stopping"),
        Err(e) => warn!("Unable to listen for shutdown signal: {}", e),
    }

    handle.stop();
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // -h/--help and flag errors print and exit here
    let options = Options::from(Cli::parse());

    let config = match ServerConfig::from_options(&options) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.log_level);
    info!("Starting zonedns v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(config).await {
        error!("{:#}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
