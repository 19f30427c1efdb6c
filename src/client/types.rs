// Remote API request/response types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Assets whose USD price the wallet shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Asset {
    Bitcoin,
    Tether,
}

impl Asset {
    /// Price API id
    pub fn id(&self) -> &'static str {
        match self {
            Asset::Bitcoin => "bitcoin",
            Asset::Tether => "tether",
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// `/simple/price` body: `{"bitcoin": {"usd": 64000.0}}`
pub type SimplePriceResponse = HashMap<String, HashMap<String, f64>>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SendParams {
    pub from: String,
    pub to: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest<P> {
    pub method: String,
    pub params: Vec<P>,
    pub id: u64,
    pub jsonrpc: String,
}

impl<P> JsonRpcRequest<P> {
    pub fn new(method: &str, params: Vec<P>) -> Self {
        Self {
            method: method.to_string(),
            params,
            id: 1,
            jsonrpc: "2.0".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

/// Status API body: `{"result": {"status": "1"}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub result: StatusResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResult {
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_payload_shape() {
        let request = JsonRpcRequest::new(
            "eth_sendTransaction",
            vec![SendParams {
                from: "0xfrom".to_string(),
                to: "0xto".to_string(),
                value: "5".to_string(),
            }],
        );
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["method"], "eth_sendTransaction");
        assert_eq!(value["id"], 1);
        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["params"][0]["to"], "0xto");
        assert_eq!(value["params"][0]["value"], "5");
    }

    #[test]
    fn test_rpc_error_body() {
        let body = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"insufficient funds"}}"#;
        let response: JsonRpcResponse = serde_json::from_str(body).unwrap();
        assert!(response.result.is_none());
        assert_eq!(response.error.unwrap().message, "insufficient funds");
    }
}
