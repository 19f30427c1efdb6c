//! Wallet store - the single source of truth for the front-end
//!
//! Holds the current network, the cached prices, the imported wallet and
//! the transaction history. Every change is published as a
//! [`WalletSnapshot`] on a watch channel so views can re-render.
//!
//! Failures of remote calls and storage are logged at the call site and
//! never surfaced from the intent methods (`switch_network`,
//! `fetch_prices`, `send_transaction`, `reload_history`, `clear_history`).
//! Lookups by id, wallet import and invalid send amounts return typed
//! errors.
//!
//! Records are updated by their `local_id`; the visible `id` becomes the
//! provider hash, which is not guaranteed unique.

use futures::future;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, Mutex, RwLock};

use crate::client::{Asset, ChainApi, HttpChainApi};
use crate::config::WalletConfig;
use crate::error::{StorageError, WalletError};
use crate::network::{AddressCheck, Network};
use crate::storage::{self, Storage};
use crate::transaction::{validate_amount, Transaction, TransactionStatus};
use crate::wallet::Wallet;

/// Last committed USD prices; both fields are written together
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Prices {
    pub bitcoin: f64,
    pub usdt: f64,
}

/// Everything a view needs to render
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSnapshot {
    pub network: Network,
    pub prices: Prices,
    /// Network of the imported wallet, if any
    pub wallet: Option<Network>,
    pub history: Vec<Transaction>,
    pub total_amount: f64,
}

struct StoreState {
    network: Network,
    prices: Prices,
    wallet: Option<Wallet>,
}

pub struct WalletStore {
    config: WalletConfig,
    api: Arc<dyn ChainApi>,
    storage: Storage,
    state: RwLock<StoreState>,
    // Persisted while locked, so storage never lags the in-memory list
    history: Mutex<Vec<Transaction>>,
    // Set while the stored history could not be read; saves are refused
    history_unreadable: AtomicBool,
    price_refreshes: AtomicU64,
    snapshot_tx: watch::Sender<WalletSnapshot>,
}

impl WalletStore {
    /// Create the store and load any persisted history
    pub fn new(config: WalletConfig, api: Arc<dyn ChainApi>, storage: Storage) -> Self {
        let (history, history_unreadable) = match storage::load_history(&storage) {
            Ok(history) => {
                log::info!("Loaded {} transaction(s) from storage", history.len());
                (history, false)
            }
            Err(e) => {
                log::error!("Error retrieving transaction history: {}", e);
                (Vec::new(), true)
            }
        };

        let initial = WalletSnapshot {
            network: config.initial_network,
            total_amount: total_of(&history),
            history: history.clone(),
            ..Default::default()
        };
        let (snapshot_tx, _) = watch::channel(initial);

        Self {
            state: RwLock::new(StoreState {
                network: config.initial_network,
                prices: Prices::default(),
                wallet: None,
            }),
            config,
            api,
            storage,
            history: Mutex::new(history),
            history_unreadable: AtomicBool::new(history_unreadable),
            price_refreshes: AtomicU64::new(0),
            snapshot_tx,
        }
    }

    /// Store wired to the HTTP APIs and the configured data directory
    pub fn from_config(config: WalletConfig) -> Result<Self, WalletError> {
        let api = Arc::new(HttpChainApi::new(&config)?);
        let storage = Storage::new_with_base_dir(config.data_dir.clone());
        Ok(Self::new(config, api, storage))
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    /// Receive a snapshot after every state change
    pub fn subscribe(&self) -> watch::Receiver<WalletSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub async fn snapshot(&self) -> WalletSnapshot {
        let (network, prices, wallet) = {
            let state = self.state.read().await;
            (state.network, state.prices, state.wallet.as_ref().map(|w| w.network))
        };
        let history = self.history.lock().await.clone();
        WalletSnapshot {
            network,
            prices,
            wallet,
            total_amount: total_of(&history),
            history,
        }
    }

    // Never called with a lock held
    async fn publish(&self) {
        let snapshot = self.snapshot().await;
        self.snapshot_tx.send_replace(snapshot);
    }

    // ========================================================================
    // Network & prices
    // ========================================================================

    pub async fn current_network(&self) -> Network {
        self.state.read().await.network
    }

    pub async fn prices(&self) -> Prices {
        self.state.read().await.prices
    }

    /// Number of price refreshes started since creation
    pub fn price_refreshes(&self) -> u64 {
        self.price_refreshes.load(Ordering::Relaxed)
    }

    /// Flip to the other network and refresh prices for it
    pub async fn switch_network(&self) -> Network {
        let network = {
            let mut state = self.state.write().await;
            state.network = state.network.toggle();
            state.network
        };
        log::info!("Switched network to {}", network);
        self.publish().await;

        self.fetch_prices().await;
        network
    }

    /// Look up both prices concurrently and commit them only if both succeed
    ///
    /// Returns the committed prices, or `None` when either lookup failed and
    /// the cache was left untouched.
    pub async fn fetch_prices(&self) -> Option<Prices> {
        self.price_refreshes.fetch_add(1, Ordering::Relaxed);
        log::info!("Fetching prices for {}...", self.current_network().await);

        let lookups = future::try_join(
            self.api.fetch_price(Asset::Bitcoin),
            self.api.fetch_price(Asset::Tether),
        );

        match lookups.await {
            Ok((bitcoin, usdt)) => {
                let prices = Prices { bitcoin, usdt };
                self.state.write().await.prices = prices;
                log::info!("Bitcoin Price: {}", prices.bitcoin);
                log::info!("USDT Price: {}", prices.usdt);
                self.publish().await;
                Some(prices)
            }
            Err(e) => {
                log::error!("Failed to fetch live prices: {}", e);
                None
            }
        }
    }

    // ========================================================================
    // Wallet
    // ========================================================================

    /// Import a wallet for `network`; the key must be 64 characters
    pub async fn import_wallet(&self, network: Network, private_key: &str) -> Result<(), WalletError> {
        match Wallet::import(network, private_key) {
            Ok(wallet) => {
                self.state.write().await.wallet = Some(wallet);
                log::info!("{} wallet imported successfully", network);
                self.publish().await;
                Ok(())
            }
            Err(e) => {
                log::error!("Invalid {} private key", network);
                Err(e)
            }
        }
    }

    pub async fn wallet(&self) -> Option<Wallet> {
        self.state.read().await.wallet.clone()
    }

    /// Check `address` with the current network's format rules
    pub async fn verify_receiver_address_format(&self, address: &str) -> AddressCheck {
        let network = self.current_network().await;
        network.verify_address(address, self.config.bitcoin_network)
    }

    /// Block explorer URL for a transaction id
    pub fn get_transaction_link(&self, transaction_id: &str) -> String {
        format!(
            "{}/tx/{}",
            self.config.explorer_url.trim_end_matches('/'),
            transaction_id
        )
    }

    // ========================================================================
    // Transactions
    // ========================================================================

    /// Submit a transfer on the current network
    ///
    /// The amount must be finite and positive; otherwise nothing is recorded
    /// and `InvalidInput` is returned. The record is added to history as
    /// `pending` before the provider is called. A successful submission
    /// replaces its id with the provider hash and looks the status up once;
    /// a failed one marks it `failed`. Returns the record as it stands
    /// afterwards.
    pub async fn send_transaction(
        &self,
        receiver_address: &str,
        amount: f64,
    ) -> Result<Transaction, WalletError> {
        let amount = validate_amount(amount).map_err(|e| {
            log::error!("Refusing to send: {}", e);
            e
        })?;

        let network = self.current_network().await;
        let mut record = Transaction::new(network, receiver_address, amount);
        let local_id = record.local_id.clone();
        log::info!(
            "Sending {} to {} on {} (record {})",
            amount,
            receiver_address,
            network,
            local_id
        );

        {
            let mut history = self.history.lock().await;
            history.push(record.clone());
            self.persist(&history).await;
        }
        self.publish().await;

        let hash = match self.api.send_transaction(receiver_address, amount).await {
            Ok(hash) => hash,
            Err(e) => {
                log::error!("Error sending transaction: {}", e);
                record.transition(TransactionStatus::Failed);
                let updated = self
                    .update_record(&local_id, |tx| {
                        tx.transition(TransactionStatus::Failed);
                    })
                    .await;
                return Ok(updated.unwrap_or(record));
            }
        };
        log::info!("Transaction sent: {}", hash);

        record.id = hash.clone();
        record.transition(TransactionStatus::Submitted);
        if let Some(updated) = self
            .update_record(&local_id, |tx| {
                tx.id = hash.clone();
                tx.transition(TransactionStatus::Submitted);
            })
            .await
        {
            record = updated;
        }

        let status = self.lookup_status(&hash).await;
        record.transition(status);
        let updated = self
            .update_record(&local_id, |tx| {
                tx.transition(status);
            })
            .await;
        Ok(updated.unwrap_or(record))
    }

    /// Look up the status of a submitted record once more
    pub async fn refresh_transaction_status(&self, id: &str) -> Result<Transaction, WalletError> {
        let record = self.find_transaction(id).await?;
        if record.status != TransactionStatus::Submitted {
            log::debug!("Transaction {} is {}, nothing to refresh", id, record.status);
            return Ok(record);
        }

        let status = self.lookup_status(&record.id).await;
        self.update_record(&record.local_id, |tx| {
            tx.transition(status);
        })
        .await
        .ok_or_else(|| WalletError::TransactionNotFound(id.to_string()))
    }

    async fn lookup_status(&self, hash: &str) -> TransactionStatus {
        match self.api.fetch_status(hash).await {
            Ok(code) => TransactionStatus::from_status_code(&code),
            Err(e) => {
                log::error!("Error fetching transaction status: {}", e);
                TransactionStatus::Unknown
            }
        }
    }

    /// Mutate the record with `local_id` in place, persist, publish.
    /// `None` if it is gone.
    async fn update_record<F>(&self, local_id: &str, update: F) -> Option<Transaction>
    where
        F: FnOnce(&mut Transaction),
    {
        let updated = {
            let mut history = self.history.lock().await;
            let record = history.iter_mut().find(|tx| tx.local_id == local_id)?;
            update(record);
            let updated = record.clone();
            self.persist(&history).await;
            updated
        };
        self.publish().await;
        Some(updated)
    }

    /// Run a storage call off the async runtime
    async fn with_storage<T, F>(&self, op: F) -> Result<T, WalletError>
    where
        F: FnOnce(&Storage) -> Result<T, StorageError> + Send + 'static,
        T: Send + 'static,
    {
        let storage = self.storage.clone();
        tokio::task::spawn_blocking(move || op(&storage))
            .await
            .map_err(|e| WalletError::Internal(format!("Storage task panicked: {}", e)))?
            .map_err(WalletError::from)
    }

    async fn persist(&self, history: &[Transaction]) {
        if self.history_unreadable.load(Ordering::SeqCst) {
            log::error!("Stored transaction history could not be read; not overwriting it");
            return;
        }
        let history = history.to_vec();
        if let Err(e) = self
            .with_storage(move |backend| storage::save_history(backend, &history))
            .await
        {
            log::error!("Error storing transaction history: {}", e);
        }
    }

    pub async fn history(&self) -> Vec<Transaction> {
        self.history.lock().await.clone()
    }

    pub async fn find_transaction(&self, id: &str) -> Result<Transaction, WalletError> {
        // Provider hashes can repeat across provider restarts; newest wins
        self.history
            .lock()
            .await
            .iter()
            .rev()
            .find(|tx| tx.id == id)
            .cloned()
            .ok_or_else(|| WalletError::TransactionNotFound(id.to_string()))
    }

    /// Explorer link for a transaction that exists in history
    pub async fn transaction_link_for(&self, id: &str) -> Result<String, WalletError> {
        let record = self.find_transaction(id).await.map_err(|e| {
            log::warn!("Invalid Transaction: {}", id);
            e
        })?;
        Ok(self.get_transaction_link(&record.id))
    }

    /// Sum of amounts across history
    pub async fn total_transaction_amount(&self) -> f64 {
        total_of(&self.history.lock().await)
    }

    /// Replace the in-memory history with the persisted copy
    pub async fn reload_history(&self) -> Vec<Transaction> {
        let reloaded = {
            let mut history = self.history.lock().await;
            match self.with_storage(storage::load_history).await {
                Ok(stored) => {
                    *history = stored;
                    self.history_unreadable.store(false, Ordering::SeqCst);
                }
                Err(e) => log::error!("Error retrieving transaction history: {}", e),
            }
            history.clone()
        };
        self.publish().await;
        reloaded
    }

    /// Erase the persisted history, then the in-memory list
    pub async fn clear_history(&self) {
        {
            let mut history = self.history.lock().await;
            if let Err(e) = self.with_storage(storage::erase_history).await {
                log::error!("Error erasing transaction history: {}", e);
                return;
            }
            history.clear();
            self.history_unreadable.store(false, Ordering::SeqCst);
        }
        log::info!("Transaction history erased successfully.");
        self.publish().await;
    }
}

fn total_of(history: &[Transaction]) -> f64 {
    history.iter().filter_map(|tx| tx.amount.value()).sum()
}
