//! Wallet Core: network switching, live prices and transaction history
//!
//! This crate provides the state behind a two-network (bitcoin, polygon)
//! wallet front-end. There is no signing or key management; transfers go to
//! a JSON-RPC provider endpoint and imported keys are only length-checked.
//!
//! # Architecture
//!
//! - **Wallet Store**: owns network selection, cached prices and the single
//!   authoritative transaction history; publishes snapshots to subscribers
//! - **Chain API**: price lookups, JSON-RPC submission and status lookups
//!   behind the [`ChainApi`] trait
//! - **Storage**: file-backed key-value entries holding the history
//!
//! # Example
//!
//! ```ignore
//! use wallet_core::{WalletConfig, WalletStore};
//!
//! let store = WalletStore::from_config(WalletConfig::from_env())?;
//! store.fetch_prices().await;
//! store.switch_network().await;
//!
//! let tx = store.send_transaction("0x5290...", 1.5).await?;
//! println!("{} -> {}", tx.id, store.get_transaction_link(&tx.id));
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod network;
pub mod storage;
pub mod store;
pub mod transaction;
pub mod wallet;

pub use client::{Asset, ChainApi, HttpChainApi};
pub use config::WalletConfig;
pub use error::{StorageError, WalletError};
pub use network::{AddressCheck, Network};
pub use storage::Storage;
pub use store::{Prices, WalletSnapshot, WalletStore};
pub use transaction::{parse_amount, validate_amount, Amount, Transaction, TransactionStatus};
pub use wallet::Wallet;

pub type Result<T> = std::result::Result<T, WalletError>;
