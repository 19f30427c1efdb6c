//! Error types for wallet store operations
//!
//! Validation, transport, storage and lookup failures. The store catches
//! most of these at the call site and logs them; only lookups and wallet
//! import hand them back to the caller.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Invalid private key for {network}: expected 64 characters, got {length}")]
    InvalidPrivateKey { network: String, length: usize },

    #[error("Unsupported network: {0}")]
    UnsupportedNetwork(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for WalletError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            WalletError::InvalidResponse(err.to_string())
        } else {
            WalletError::Network(err.to_string())
        }
    }
}

impl WalletError {
    /// Whether this error came from talking to a remote service
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            WalletError::Network(_) | WalletError::InvalidResponse(_) | WalletError::Rpc(_)
        )
    }
}
