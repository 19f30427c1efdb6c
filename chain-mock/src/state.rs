//! In-memory chain state behind the mock endpoints
//!
//! Holds quoted prices, accepted transfers and their status codes, plus
//! fault switches so tests can make any single endpoint fail.

use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tokio::sync::Mutex;

use crate::types::{FaultsUpdate, MockStats, SubmittedTransfer};

pub const DEFAULT_BITCOIN_PRICE: f64 = 64_000.0;
pub const DEFAULT_TETHER_PRICE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub enum MockFault {
    /// The asset has a fault switched on
    Injected(String),
    /// The asset was never quoted
    UnknownAsset(String),
}

impl std::fmt::Display for MockFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MockFault::Injected(what) => write!(f, "injected fault: {}", what),
            MockFault::UnknownAsset(asset) => write!(f, "unknown asset: {}", asset),
        }
    }
}

#[derive(Debug, Default)]
struct Faults {
    price: HashSet<String>,
    submit: bool,
    status: bool,
}

struct Inner {
    prices: HashMap<String, f64>,
    transfers: Vec<SubmittedTransfer>,
    faults: Faults,
    stats: MockStats,
    default_status: String,
}

pub struct MockChain {
    inner: Mutex<Inner>,
}

impl MockChain {
    /// New chain; accepted transfers report `default_status` ("1", "0", ...)
    pub fn new(default_status: &str) -> Self {
        let prices = HashMap::from([
            ("bitcoin".to_string(), DEFAULT_BITCOIN_PRICE),
            ("tether".to_string(), DEFAULT_TETHER_PRICE),
        ]);
        Self {
            inner: Mutex::new(Inner {
                prices,
                transfers: Vec::new(),
                faults: Faults::default(),
                stats: MockStats::default(),
                default_status: default_status.to_string(),
            }),
        }
    }

    pub async fn price(&self, asset: &str) -> Result<f64, MockFault> {
        let mut inner = self.inner.lock().await;
        inner.stats.price_requests += 1;
        if inner.faults.price.contains(asset) {
            return Err(MockFault::Injected(format!("price:{}", asset)));
        }
        inner
            .prices
            .get(asset)
            .copied()
            .ok_or_else(|| MockFault::UnknownAsset(asset.to_string()))
    }

    /// Accept a transfer and return its hash
    pub async fn submit(&self, from: &str, to: &str, value: Value) -> Result<String, MockFault> {
        let mut inner = self.inner.lock().await;
        inner.stats.rpc_requests += 1;
        if inner.faults.submit {
            return Err(MockFault::Injected("submit".to_string()));
        }

        let hash = format!("0x{:064x}", inner.transfers.len() + 1);
        let status = inner.default_status.clone();
        inner.transfers.push(SubmittedTransfer {
            hash: hash.clone(),
            from: from.to_string(),
            to: to.to_string(),
            value,
            status,
        });
        log::info!("Accepted transfer {} -> {} as {}", from, to, hash);
        Ok(hash)
    }

    /// Status code of a transfer; unknown hashes report an empty code
    pub async fn status(&self, hash: &str) -> Result<String, MockFault> {
        let mut inner = self.inner.lock().await;
        inner.stats.status_requests += 1;
        if inner.faults.status {
            return Err(MockFault::Injected("status".to_string()));
        }
        Ok(inner
            .transfers
            .iter()
            .find(|t| t.hash == hash)
            .map(|t| t.status.clone())
            .unwrap_or_default())
    }

    pub async fn set_price(&self, asset: &str, usd: f64) {
        self.inner.lock().await.prices.insert(asset.to_string(), usd);
    }

    /// Returns false if no transfer has that hash
    pub async fn set_status(&self, hash: &str, status: &str) -> bool {
        let mut inner = self.inner.lock().await;
        match inner.transfers.iter_mut().find(|t| t.hash == hash) {
            Some(transfer) => {
                transfer.status = status.to_string();
                true
            }
            None => false,
        }
    }

    pub async fn apply_faults(&self, update: FaultsUpdate) {
        let mut inner = self.inner.lock().await;
        if let Some(assets) = update.price {
            inner.faults.price = assets.into_iter().collect();
        }
        if let Some(submit) = update.submit {
            inner.faults.submit = submit;
        }
        if let Some(status) = update.status {
            inner.faults.status = status;
        }
        log::info!("Faults now: {:?}", inner.faults);
    }

    pub async fn stats(&self) -> MockStats {
        self.inner.lock().await.stats.clone()
    }

    pub async fn transfers(&self) -> Vec<SubmittedTransfer> {
        self.inner.lock().await.transfers.clone()
    }
}

impl Default for MockChain {
    fn default() -> Self {
        Self::new("1")
    }
}
