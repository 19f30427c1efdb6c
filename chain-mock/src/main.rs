//! Chain Mock Server
//!
//! A lightweight mock of the price, provider and status APIs for local
//! development against the wallet.

use anyhow::{Context, Result};
use std::env;
use std::sync::Arc;

use chain_mock::{run_server, MockChain};

#[derive(Debug)]
struct Config {
    // Server
    server_host: String,
    server_port: u16,

    // Status code reported for accepted transfers
    default_status: String,
}

impl Config {
    fn from_env() -> Result<Self> {
        dotenv::dotenv().ok(); // Load .env file if present

        let server_host = env::var("SERVER_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "4000".to_string())
            .parse()
            .context("Invalid SERVER_PORT")?;

        let default_status = env::var("MOCK_TX_STATUS")
            .unwrap_or_else(|_| "1".to_string());

        Ok(Self {
            server_host,
            server_port,
            default_status,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    log::info!("Starting chain mock server...");

    // Load configuration
    let config = Config::from_env()
        .context("Failed to load configuration")?;

    log::info!("Server will listen on {}:{}", config.server_host, config.server_port);
    log::info!("Accepted transfers report status {:?}", config.default_status);

    let chain = Arc::new(MockChain::new(&config.default_status));

    // Run server
    run_server(chain, config.server_host, config.server_port)
        .await
        .context("Server error")?;

    Ok(())
}
