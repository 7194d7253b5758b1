//! Tokenlon v6 RFQ reference market maker - Entry Point

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// Tokenlon v6 RFQ reference market maker
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via RFQ_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    rfq_telemetry::init_logging()?;

    info!("Starting RFQ Maker v{}", env!("CARGO_PKG_VERSION"));

    // CLI arg > RFQ_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var("RFQ_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    info!(config_path = %config_path, "Loading configuration");

    let config = rfq_maker::AppConfig::load(&config_path)?;
    info!(listen_addr = %config.server.listen_addr, chains = config.chains.len(), "Configuration loaded");

    let app = rfq_maker::Application::new(config)?;
    app.run().await?;

    Ok(())
}
