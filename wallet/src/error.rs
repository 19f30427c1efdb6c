use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use wallet_core::WalletError;

/// `WalletError` rendered as an HTTP response
#[derive(Debug)]
pub struct ApiError(pub WalletError);

impl From<WalletError> for ApiError {
    fn from(err: WalletError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            WalletError::TransactionNotFound(_) => StatusCode::NOT_FOUND,
            WalletError::InvalidPrivateKey { .. } => StatusCode::BAD_REQUEST,
            WalletError::UnsupportedNetwork(_) => StatusCode::BAD_REQUEST,
            WalletError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            err if err.is_transport() => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}
