pub mod types;
pub mod config;
pub mod error;
pub mod data;
pub mod filter;
pub mod pledge;
pub mod chart;
pub mod map;
pub mod render;
pub mod pages;
pub mod router;
pub mod server;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the dashboard
    Serve {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
    /// Strictly load the configured hotspot table and report what it contains
    Check {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Serve { config } => {
            tracing::info!("Serving dashboard with config: {:?}", config);
            let app_config = config::AppConfig::load_or_default(config)?;

            // Datasets are read once; every request shares them read-only.
            let datasets = data::Datasets::load(&app_config);

            server::start_server(app_config, datasets).await?;
        }
        Commands::Check { config } => {
            let app_config = config::AppConfig::load_or_default(config)?;
            println!("{}", data::check_report(&app_config)?);
        }
    }

    Ok(())
}
