//! Remote price, submission and status lookups
//!
//! `ChainApi` is the seam between the store and the network. `HttpChainApi`
//! talks to the real services; tests substitute their own implementation.

mod http;
pub mod types;

use async_trait::async_trait;

use crate::error::WalletError;

pub use http::HttpChainApi;
pub use types::Asset;

#[async_trait]
pub trait ChainApi: Send + Sync {
    /// USD price of `asset`
    async fn fetch_price(&self, asset: Asset) -> Result<f64, WalletError>;

    /// Submit a transfer, returning the provider-assigned hash
    async fn send_transaction(&self, receiver_address: &str, amount: f64) -> Result<String, WalletError>;

    /// Raw status code for a hash ("1" success, "0" failure)
    async fn fetch_status(&self, transaction_hash: &str) -> Result<String, WalletError>;
}
