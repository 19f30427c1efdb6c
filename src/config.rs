//! Wallet configuration from environment variables
//!
//! Controls the starting network, the remote API endpoints and the local
//! data directory. Defaults point at the public services.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::network::Network;

pub const DEFAULT_PRICE_API_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_STATUS_API_URL: &str = "https://api.etherscan.io/api";
pub const DEFAULT_EXPLORER_URL: &str = "https://blockexplorer.com";
pub const DEFAULT_SENDER_ADDRESS: &str = "YOUR_SENDER_ADDRESS";

#[derive(Clone, Debug)]
pub struct WalletConfig {
    /// Network selected at startup
    pub initial_network: Network,
    /// Bitcoin network used for address format checks
    pub bitcoin_network: bitcoin::Network,
    /// Base URL of the price API (`/simple/price` is appended)
    pub price_api_url: String,
    /// JSON-RPC provider endpoint used for submissions
    pub rpc_provider_url: String,
    /// `from` field of submitted transactions
    pub sender_address: String,
    /// Transaction status API endpoint
    pub status_api_url: String,
    /// API key passed to the status endpoint
    pub status_api_key: String,
    /// Block explorer base URL for transaction links
    pub explorer_url: String,
    /// Directory holding persisted wallet data
    pub data_dir: PathBuf,
    /// Per-request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
}

impl WalletConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `WALLET_NETWORK`: "bitcoin" (default) or "polygon"
    /// - `BITCOIN_NETWORK`: "bitcoin" (default), "testnet", "signet" or "regtest"
    /// - `PRICE_API_URL`, `RPC_PROVIDER_URL`, `STATUS_API_URL`, `EXPLORER_URL`
    /// - `INFURA_PROJECT_ID`: used to build the default provider URL
    /// - `SENDER_ADDRESS`, `ETHERSCAN_API_KEY`
    /// - `WALLET_DATA_DIR`: defaults to "./wallet-data"
    /// - `HTTP_TIMEOUT_SECS`: optional request timeout
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Point every remote call at a local chain-mock
    /// PRICE_API_URL=http://localhost:4000/api/v3 \
    /// RPC_PROVIDER_URL=http://localhost:4000/rpc \
    /// STATUS_API_URL=http://localhost:4000/api cargo run -p wallet
    /// ```
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let initial_network = match env::var("WALLET_NETWORK") {
            Ok(value) => match value.parse::<Network>() {
                Ok(network) => network,
                Err(e) => {
                    log::warn!("⚠️  {}, starting on {}", e, defaults.initial_network);
                    defaults.initial_network
                }
            },
            Err(_) => defaults.initial_network,
        };
        log::info!("🌐 Starting network: {}", initial_network);

        let bitcoin_network = match env::var("BITCOIN_NETWORK")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "" | "bitcoin" | "mainnet" => bitcoin::Network::Bitcoin,
            "testnet" => bitcoin::Network::Testnet,
            "signet" => bitcoin::Network::Signet,
            "regtest" => bitcoin::Network::Regtest,
            other => {
                log::warn!("⚠️  Unknown bitcoin network '{}', defaulting to mainnet", other);
                bitcoin::Network::Bitcoin
            }
        };

        let price_api_url = env::var("PRICE_API_URL").unwrap_or(defaults.price_api_url);
        log::info!("📡 Price API: {}", price_api_url);

        let rpc_provider_url = env::var("RPC_PROVIDER_URL").unwrap_or_else(|_| {
            let project_id = env::var("INFURA_PROJECT_ID").unwrap_or_default();
            provider_url_for(&project_id)
        });
        log::info!("🔗 RPC provider: {}", rpc_provider_url);

        let status_api_url = env::var("STATUS_API_URL").unwrap_or(defaults.status_api_url);
        log::info!("🔎 Status API: {}", status_api_url);

        let request_timeout = env::var("HTTP_TIMEOUT_SECS").ok().and_then(|secs| {
            match secs.parse::<u64>() {
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(_) => {
                    log::warn!("⚠️  Ignoring invalid HTTP_TIMEOUT_SECS '{}'", secs);
                    None
                }
            }
        });

        let data_dir = env::var("WALLET_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        log::info!("💾 Data directory: {}", data_dir.display());

        Self {
            initial_network,
            bitcoin_network,
            price_api_url,
            rpc_provider_url,
            sender_address: env::var("SENDER_ADDRESS").unwrap_or(defaults.sender_address),
            status_api_url,
            status_api_key: env::var("ETHERSCAN_API_KEY").unwrap_or_default(),
            explorer_url: env::var("EXPLORER_URL").unwrap_or(defaults.explorer_url),
            data_dir,
            request_timeout,
        }
    }

    /// Point every remote endpoint at one base URL (a local chain-mock)
    pub fn with_mock_base(mut self, base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        self.price_api_url = format!("{}/api/v3", base);
        self.rpc_provider_url = format!("{}/rpc", base);
        self.status_api_url = format!("{}/api", base);
        self
    }
}

fn provider_url_for(project_id: &str) -> String {
    format!("https://mainnet.infura.io/v3/{}", project_id)
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            initial_network: Network::Bitcoin,
            bitcoin_network: bitcoin::Network::Bitcoin,
            price_api_url: DEFAULT_PRICE_API_URL.to_string(),
            rpc_provider_url: provider_url_for(""),
            sender_address: DEFAULT_SENDER_ADDRESS.to_string(),
            status_api_url: DEFAULT_STATUS_API_URL.to_string(),
            status_api_key: String::new(),
            explorer_url: DEFAULT_EXPLORER_URL.to_string(),
            data_dir: PathBuf::from("./wallet-data"),
            request_timeout: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_bitcoin_mainnet() {
        let config = WalletConfig::default();
        assert_eq!(config.initial_network, Network::Bitcoin);
        assert!(matches!(config.bitcoin_network, bitcoin::Network::Bitcoin));
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_with_mock_base() {
        let config = WalletConfig::default().with_mock_base("http://127.0.0.1:4000/");
        assert_eq!(config.price_api_url, "http://127.0.0.1:4000/api/v3");
        assert_eq!(config.rpc_provider_url, "http://127.0.0.1:4000/rpc");
        assert_eq!(config.status_api_url, "http://127.0.0.1:4000/api");
        assert_eq!(config.explorer_url, DEFAULT_EXPLORER_URL);
    }
}
