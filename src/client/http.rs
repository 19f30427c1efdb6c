use async_trait::async_trait;

use super::types::{
    Asset, JsonRpcRequest, JsonRpcResponse, SendParams, SimplePriceResponse, StatusResponse,
};
use super::ChainApi;
use crate::config::WalletConfig;
use crate::error::WalletError;

/// `ChainApi` over the public price, provider and status HTTP endpoints
pub struct HttpChainApi {
    client: reqwest::Client,
    price_api_url: String,
    rpc_provider_url: String,
    sender_address: String,
    status_api_url: String,
    status_api_key: String,
}

impl HttpChainApi {
    pub fn new(config: &WalletConfig) -> Result<Self, WalletError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| WalletError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            price_api_url: config.price_api_url.trim_end_matches('/').to_string(),
            rpc_provider_url: config.rpc_provider_url.clone(),
            sender_address: config.sender_address.clone(),
            status_api_url: config.status_api_url.clone(),
            status_api_key: config.status_api_key.clone(),
        })
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, WalletError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(WalletError::Network(format!("HTTP {}: {}", status, error_text)))
    }
}

#[async_trait]
impl ChainApi for HttpChainApi {
    async fn fetch_price(&self, asset: Asset) -> Result<f64, WalletError> {
        let url = format!("{}/simple/price", self.price_api_url);
        log::debug!("Fetching {} price from {}", asset, url);

        let response = self
            .client
            .get(&url)
            .query(&[("ids", asset.id()), ("vs_currencies", "usd")])
            .send()
            .await?;
        let body: SimplePriceResponse = Self::check_status(response).await?.json().await?;

        body.get(asset.id())
            .and_then(|quotes| quotes.get("usd"))
            .copied()
            .ok_or_else(|| {
                WalletError::InvalidResponse(format!("No USD quote for {} in price response", asset))
            })
    }

    async fn send_transaction(&self, receiver_address: &str, amount: f64) -> Result<String, WalletError> {
        let request = JsonRpcRequest::new(
            "eth_sendTransaction",
            vec![SendParams {
                from: self.sender_address.clone(),
                to: receiver_address.to_string(),
                value: amount.to_string(),
            }],
        );
        log::debug!("Submitting transaction to: {}", self.rpc_provider_url);

        let response = self
            .client
            .post(&self.rpc_provider_url)
            .json(&request)
            .send()
            .await?;
        let body: JsonRpcResponse = Self::check_status(response).await?.json().await?;

        if let Some(error) = body.error {
            return Err(WalletError::Rpc(format!("{} (code {})", error.message, error.code)));
        }
        body.result
            .filter(|hash| !hash.is_empty())
            .ok_or_else(|| WalletError::InvalidResponse("Missing result in RPC response".to_string()))
    }

    async fn fetch_status(&self, transaction_hash: &str) -> Result<String, WalletError> {
        let response = self
            .client
            .get(&self.status_api_url)
            .query(&[
                ("module", "transaction"),
                ("action", "getstatus"),
                ("txhash", transaction_hash),
                ("apikey", self.status_api_key.as_str()),
            ])
            .send()
            .await?;
        let body: StatusResponse = Self::check_status(response).await?.json().await?;
        Ok(body.result.status)
    }
}
