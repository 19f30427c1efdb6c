//! Common test utilities for wallet store integration tests
//!
//! This module provides shared test infrastructure including:
//! - A scripted `ChainApi` with per-call fault switches and call counters
//! - Test environment setup with a throwaway storage directory

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use wallet_core::{Asset, ChainApi, Storage, WalletConfig, WalletError, WalletStore};

pub const BITCOIN_PRICE: f64 = 64_000.0;
pub const TETHER_PRICE: f64 = 1.0;

/// In-process `ChainApi` whose answers tests can change between calls
pub struct ScriptedChainApi {
    prices: Mutex<HashMap<Asset, f64>>,
    failing_assets: Mutex<Vec<Asset>>,
    submit_failure: Mutex<Option<String>>,
    status_answer: Mutex<Result<String, String>>,
    next_hash: AtomicU64,
    pub price_calls: AtomicU64,
    pub submit_calls: AtomicU64,
    pub status_calls: AtomicU64,
}

impl ScriptedChainApi {
    pub fn new() -> Self {
        Self {
            prices: Mutex::new(HashMap::from([
                (Asset::Bitcoin, BITCOIN_PRICE),
                (Asset::Tether, TETHER_PRICE),
            ])),
            failing_assets: Mutex::new(Vec::new()),
            submit_failure: Mutex::new(None),
            status_answer: Mutex::new(Ok("1".to_string())),
            next_hash: AtomicU64::new(1),
            price_calls: AtomicU64::new(0),
            submit_calls: AtomicU64::new(0),
            status_calls: AtomicU64::new(0),
        }
    }

    pub fn set_price(&self, asset: Asset, usd: f64) {
        self.prices.lock().unwrap().insert(asset, usd);
    }

    pub fn fail_price(&self, asset: Asset) {
        self.failing_assets.lock().unwrap().push(asset);
    }

    pub fn heal_prices(&self) {
        self.failing_assets.lock().unwrap().clear();
    }

    pub fn fail_submissions(&self, message: &str) {
        *self.submit_failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn answer_status(&self, answer: Result<&str, &str>) {
        *self.status_answer.lock().unwrap() = answer.map(str::to_string).map_err(str::to_string);
    }

    /// Hand out hashes from the start again, as a restarted provider would
    pub fn restart_hash_numbering(&self) {
        self.next_hash.store(1, Ordering::SeqCst);
    }

    pub fn calls(counter: &AtomicU64) -> u64 {
        counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainApi for ScriptedChainApi {
    async fn fetch_price(&self, asset: Asset) -> Result<f64, WalletError> {
        self.price_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_assets.lock().unwrap().contains(&asset) {
            return Err(WalletError::Network(format!("{} lookup refused", asset)));
        }
        self.prices
            .lock()
            .unwrap()
            .get(&asset)
            .copied()
            .ok_or_else(|| WalletError::InvalidResponse(format!("no quote for {}", asset)))
    }

    async fn send_transaction(&self, _receiver_address: &str, _amount: f64) -> Result<String, WalletError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.submit_failure.lock().unwrap().clone() {
            return Err(WalletError::Rpc(message));
        }
        let n = self.next_hash.fetch_add(1, Ordering::SeqCst);
        Ok(format!("0x{:064x}", n))
    }

    async fn fetch_status(&self, _transaction_hash: &str) -> Result<String, WalletError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.status_answer
            .lock()
            .unwrap()
            .clone()
            .map_err(WalletError::Network)
    }
}

/// Test environment with automatic cleanup
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub api: Arc<ScriptedChainApi>,
    pub store: WalletStore,
}

impl TestEnvironment {
    pub fn new() -> anyhow::Result<Self> {
        init_logging();
        let temp_dir = TempDir::new()?;
        log::info!("📁 Test directory: {:?}", temp_dir.path());

        let api = Arc::new(ScriptedChainApi::new());
        let store = WalletStore::new(test_config(&temp_dir), api.clone(), storage_in(&temp_dir));

        Ok(Self {
            temp_dir,
            api,
            store,
        })
    }

    /// A second store over the same storage directory (a process restart)
    pub fn reopen(&self) -> WalletStore {
        WalletStore::new(
            test_config(&self.temp_dir),
            self.api.clone(),
            storage_in(&self.temp_dir),
        )
    }

    pub fn storage(&self) -> Storage {
        storage_in(&self.temp_dir)
    }
}

pub fn test_config(temp_dir: &TempDir) -> WalletConfig {
    WalletConfig {
        data_dir: temp_dir.path().to_path_buf(),
        ..Default::default()
    }
}

pub fn storage_in(temp_dir: &TempDir) -> Storage {
    Storage::new_with_base_dir(temp_dir.path().to_path_buf())
}

pub fn init_logging() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();
}
