use std::env;
use wallet::api::server;
use wallet_core::WalletConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Initialize logger (set RUST_LOG=debug for verbose output, RUST_LOG=info for normal)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Read bind address from environment variable, default to 0.0.0.0:3000
    // Use BIND_ADDRESS=127.0.0.1:3000 for local development
    let addr = env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let config = WalletConfig::from_env();

    log::info!("Starting wallet server on {}", addr);
    server::start_server(&addr, config).await?;
    Ok(())
}
