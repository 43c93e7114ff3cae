//! Catalog server entry point.
//!
//! ```bash
//! # serve the catalog
//! emi-storefront --config config/storefront.toml serve
//!
//! # replace the catalog with a seed document
//! emi-storefront seed --file data/products.seed.json
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use emi_storefront::catalog::{self, seed};
use emi_storefront::{AppConfig, SafeTimeProvider, Server, TimeSource};

/// Product catalog with EMI financing quotes
#[derive(Parser)]
#[command(name = "emi-storefront")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true, env = "STOREFRONT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the REST API (default)
    Serve,

    /// Replace the catalog with the products in a seed document
    Seed {
        /// JSON array of products
        #[arg(short, long, default_value = "data/products.seed.json")]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_filter.clone()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("emi-storefront v{}", env!("CARGO_PKG_VERSION"));

    let location = config.datastore()?;
    let store = catalog::open_catalog(&location)
        .await
        .with_context(|| format!("opening datastore {}", config.datastore_uri))?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let server = Server::new(config, store);
            server.start().await?;
        }
        Commands::Seed { file } => {
            let mut products = seed::load_seed(&file)
                .await
                .with_context(|| format!("reading seed document {}", file.display()))?;
            {
                let time = SafeTimeProvider::new(TimeSource::System);
                seed::stamp_created_at(&mut products, &time);
            }
            seed::seed(store.as_ref(), products).await?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => AppConfig::default(),
    };
    Ok(config.with_overrides(|key| std::env::var(key).ok())?)
}
