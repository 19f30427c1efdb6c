//! Axum HTTP handlers for the mocked remote APIs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::state::{MockChain, MockFault};
use crate::types::*;

/// Shared application state
pub type AppState = Arc<MockChain>;

/// Custom error type for handlers
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, message).into_response()
    }
}

impl From<MockFault> for ApiError {
    fn from(fault: MockFault) -> Self {
        ApiError::Internal(fault.to_string())
    }
}

/// GET /api/v3/simple/price?ids=bitcoin,tether&vs_currencies=usd
/// Returns `{"<id>": {"usd": <price>}}`; any failing id fails the request
pub async fn simple_price(
    State(chain): State<AppState>,
    Query(query): Query<PriceQuery>,
) -> Result<Json<HashMap<String, HashMap<String, f64>>>, ApiError> {
    if query.vs_currencies != "usd" {
        return Err(ApiError::BadRequest(format!(
            "Unsupported currency: {}",
            query.vs_currencies
        )));
    }

    let mut body = HashMap::new();
    for id in query.ids.split(',').map(str::trim).filter(|id| !id.is_empty()) {
        let usd = chain.price(id).await?;
        body.insert(id.to_string(), HashMap::from([("usd".to_string(), usd)]));
    }
    Ok(Json(body))
}

/// POST /rpc
/// JSON-RPC provider; only `eth_sendTransaction` is implemented
pub async fn json_rpc(
    State(chain): State<AppState>,
    Json(req): Json<RpcRequest>,
) -> Json<RpcResponse> {
    if req.jsonrpc != "2.0" {
        log::warn!("Request without jsonrpc 2.0 marker: {:?}", req.jsonrpc);
    }
    if req.method != "eth_sendTransaction" {
        return Json(RpcResponse::err(
            req.id,
            -32601,
            format!("Method not found: {}", req.method),
        ));
    }

    let Some(params) = req.params.first() else {
        return Json(RpcResponse::err(req.id, -32602, "Missing transaction params"));
    };
    let from = params.get("from").and_then(Value::as_str).unwrap_or_default();
    let Some(to) = params.get("to").and_then(Value::as_str) else {
        return Json(RpcResponse::err(req.id, -32602, "Missing 'to' address"));
    };
    let value = params.get("value").cloned().unwrap_or(Value::Null);

    match chain.submit(from, to, value).await {
        Ok(hash) => Json(RpcResponse::ok(req.id, hash)),
        Err(fault) => Json(RpcResponse::err(req.id, -32000, fault.to_string())),
    }
}

/// GET /api?module=transaction&action=getstatus&txhash=...
pub async fn transaction_status(
    State(chain): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<StatusResponse>, ApiError> {
    if query.module != "transaction" || query.action != "getstatus" {
        return Err(ApiError::BadRequest(format!(
            "Unsupported call: module={} action={}",
            query.module, query.action
        )));
    }
    log::debug!(
        "Status lookup for {} (api key present: {})",
        query.txhash,
        query.apikey.is_some()
    );

    let status = chain.status(&query.txhash).await?;
    Ok(Json(StatusResponse {
        status: "1".to_string(),
        message: "OK".to_string(),
        result: StatusResult { status },
    }))
}

// ============================================================================
// CONTROL ENDPOINTS (test helpers, not part of the mocked APIs)
// ============================================================================

/// POST /mock/faults
pub async fn set_faults(
    State(chain): State<AppState>,
    Json(update): Json<FaultsUpdate>,
) -> StatusCode {
    chain.apply_faults(update).await;
    StatusCode::NO_CONTENT
}

/// POST /mock/prices
pub async fn set_price(
    State(chain): State<AppState>,
    Json(req): Json<SetPriceRequest>,
) -> StatusCode {
    log::info!("Quoting {} at {} USD", req.asset, req.usd);
    chain.set_price(&req.asset, req.usd).await;
    StatusCode::NO_CONTENT
}

/// POST /mock/tx/{hash}/status
pub async fn set_status(
    State(chain): State<AppState>,
    Path(hash): Path<String>,
    Json(req): Json<SetStatusRequest>,
) -> Result<StatusCode, ApiError> {
    if chain.set_status(&hash, &req.status).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Transaction not found: {}", hash)))
    }
}

/// GET /mock/transfers
pub async fn list_transfers(State(chain): State<AppState>) -> Json<Vec<SubmittedTransfer>> {
    Json(chain.transfers().await)
}

/// GET /mock/stats
pub async fn stats(State(chain): State<AppState>) -> Json<MockStats> {
    Json(chain.stats().await)
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}
