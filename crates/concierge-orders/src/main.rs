//! Concierge Orders CLI
//!
//! Starts the order-status HTTP server.

use clap::Parser;
use concierge_orders::{config::OrdersConfig, start_server, OrdersError};
use std::path::PathBuf;
use std::process;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Concierge Orders - order-status lookup service.
///
/// Serves `GET /order/<id>` (the order record, or 404 {"error": "Order not
/// found"}) and `GET /health`.
#[derive(Debug, Parser)]
#[command(name = "concierge-orders", version)]
struct Args {
    /// TOML file with bind_address, bind_port and [[orders]] records
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Args {
    fn load_config(&self) -> Result<OrdersConfig, OrdersError> {
        match &self.config {
            Some(path) => Ok(OrdersConfig::from_file(path)?),
            None => {
                warn!("No config file specified, serving the sample orders");
                Ok(OrdersConfig::default_test_config())
            }
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), OrdersError> {
    let config = args.load_config()?;
    start_server(config).await
}
