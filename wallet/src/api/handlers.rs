use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use wallet_core::{parse_amount, Transaction, WalletSnapshot, WalletStore};

use super::types::*;
use crate::error::ApiError;

pub type AppState = Arc<WalletStore>;

pub async fn get_state_handler(State(store): State<AppState>) -> Json<WalletSnapshot> {
    Json(store.snapshot().await)
}

pub async fn switch_network_handler(
    State(store): State<AppState>,
) -> Json<SwitchNetworkResponse> {
    let network = store.switch_network().await;
    Json(SwitchNetworkResponse {
        network,
        prices: store.prices().await,
    })
}

pub async fn refresh_prices_handler(
    State(store): State<AppState>,
) -> Json<RefreshPricesResponse> {
    let refreshed = store.fetch_prices().await.is_some();
    Json(RefreshPricesResponse {
        network: store.current_network().await,
        prices: store.prices().await,
        refreshed,
    })
}

pub async fn import_wallet_handler(
    State(store): State<AppState>,
    Json(req): Json<ImportWalletRequest>,
) -> Result<Json<ImportWalletResponse>, ApiError> {
    store.import_wallet(req.network, &req.private_key).await?;
    Ok(Json(ImportWalletResponse {
        network: req.network,
        status: "imported".to_string(),
    }))
}

pub async fn verify_address_handler(
    State(store): State<AppState>,
    Json(req): Json<VerifyAddressRequest>,
) -> Json<VerifyAddressResponse> {
    let result = store.verify_receiver_address_format(&req.address).await;
    Json(VerifyAddressResponse {
        network: store.current_network().await,
        address: req.address,
        result,
    })
}

pub async fn list_transactions_handler(State(store): State<AppState>) -> Json<Vec<Transaction>> {
    Json(store.history().await)
}

pub async fn send_transaction_handler(
    State(store): State<AppState>,
    Json(req): Json<SendTransactionRequest>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let amount = parse_amount(&req.amount)?;
    let record = store.send_transaction(&req.receiver_address, amount).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn clear_transactions_handler(State(store): State<AppState>) -> StatusCode {
    store.clear_history().await;
    StatusCode::NO_CONTENT
}

pub async fn reload_transactions_handler(
    State(store): State<AppState>,
) -> Json<Vec<Transaction>> {
    Json(store.reload_history().await)
}

pub async fn total_amount_handler(State(store): State<AppState>) -> Json<TotalAmountResponse> {
    Json(TotalAmountResponse {
        total: store.total_transaction_amount().await,
    })
}

pub async fn transaction_link_handler(
    State(store): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TransactionLinkResponse>, ApiError> {
    let url = store.transaction_link_for(&id).await?;
    Ok(Json(TransactionLinkResponse { id, url }))
}

pub async fn refresh_status_handler(
    State(store): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Transaction>, ApiError> {
    let record = store.refresh_transaction_status(&id).await?;
    Ok(Json(record))
}
