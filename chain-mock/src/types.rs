//! Wire types served by the mock
//!
//! Shapes follow the public price API, an Ethereum JSON-RPC provider and
//! the explorer's `getstatus` endpoint so clients consume them unchanged.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query of GET /api/v3/simple/price
#[derive(Debug, Deserialize)]
pub struct PriceQuery {
    pub ids: String,
    #[serde(default = "default_vs_currency")]
    pub vs_currencies: String,
}

fn default_vs_currency() -> String {
    "usd".to_string()
}

/// Body of POST /rpc
#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    pub method: String,
    #[serde(default)]
    pub params: Vec<Value>,
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub jsonrpc: String,
}

#[derive(Debug, Serialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

#[derive(Debug, Serialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl RpcResponse {
    pub fn ok(id: Value, result: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn err(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// Query of GET /api?module=transaction&action=getstatus&txhash=...
#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub module: String,
    pub action: String,
    pub txhash: String,
    #[serde(default)]
    pub apikey: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
    pub result: StatusResult,
}

#[derive(Debug, Serialize)]
pub struct StatusResult {
    pub status: String,
}

/// Body of POST /mock/faults; omitted fields keep their current value
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct FaultsUpdate {
    pub price: Option<Vec<String>>,
    pub submit: Option<bool>,
    pub status: Option<bool>,
}

/// Body of POST /mock/prices
#[derive(Debug, Serialize, Deserialize)]
pub struct SetPriceRequest {
    pub asset: String,
    pub usd: f64,
}

/// Body of POST /mock/tx/{hash}/status
#[derive(Debug, Serialize, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}

/// Transfer as seen by the provider
#[derive(Debug, Clone, Serialize)]
pub struct SubmittedTransfer {
    pub hash: String,
    pub from: String,
    pub to: String,
    pub value: Value,
    pub status: String,
}

/// Response of GET /mock/stats
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MockStats {
    pub price_requests: u64,
    pub rpc_requests: u64,
    pub status_requests: u64,
}
