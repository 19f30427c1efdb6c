//! Client-side transaction records and their lifecycle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::error::WalletError;
use crate::network::Network;

/// Lifecycle of a transfer attempt
///
/// `Pending` is the optimistic state before the provider answers.
/// `Completed`, `Failed` and `Unknown` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Submitted,
    Completed,
    Failed,
    Unknown,
}

impl TransactionStatus {
    /// Map the status API's `result.status` code
    pub fn from_status_code(code: &str) -> Self {
        match code {
            "1" => TransactionStatus::Completed,
            "0" => TransactionStatus::Failed,
            _ => TransactionStatus::Unknown,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Completed | TransactionStatus::Failed | TransactionStatus::Unknown
        )
    }

    /// Whether moving from `self` to `next` is a legal lifecycle step
    pub fn can_transition_to(&self, next: TransactionStatus) -> bool {
        use TransactionStatus::*;
        matches!(
            (self, next),
            (Pending, Submitted) | (Pending, Failed) | (Submitted, Completed | Failed | Unknown)
        )
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Submitted => "submitted",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Transferred amount
///
/// Older entries stored the raw text the user typed, which is kept as-is so
/// rewriting the history never loses it. Text that is not a finite number
/// counts as zero.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Value(f64),
    Text(String),
}

impl Amount {
    /// Numeric value, `None` for unreadable text and non-finite values
    pub fn value(&self) -> Option<f64> {
        match self {
            Amount::Value(value) => Some(*value).filter(|v| v.is_finite()),
            Amount::Text(text) => text.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Value(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Value(value) => write!(f, "{}", value),
            Amount::Text(text) => f.write_str(text),
        }
    }
}

// serde_json writes NaN and infinities as `null`, which would not read back
impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Amount::Value(value) if value.is_finite() => serializer.serialize_f64(*value),
            Amount::Value(value) => serializer.serialize_str(&value.to_string()),
            Amount::Text(text) => serializer.serialize_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Local id until the provider assigns a hash, then the hash
    pub id: String,
    /// Stable key of this record; provider hashes are not unique
    #[serde(default = "new_local_id")]
    pub local_id: String,
    pub receiver_address: String,
    pub amount: Amount,
    pub status: TransactionStatus,
    #[serde(default)]
    pub network: Network,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// New optimistic record with a random id
    pub fn new(network: Network, receiver_address: impl Into<String>, amount: f64) -> Self {
        let local_id = new_local_id();
        Self {
            id: local_id.clone(),
            local_id,
            receiver_address: receiver_address.into(),
            amount: Amount::Value(amount),
            status: TransactionStatus::Pending,
            network,
            created_at: Utc::now(),
        }
    }

    /// Apply a status change, ignoring steps the lifecycle does not allow
    pub fn transition(&mut self, next: TransactionStatus) -> bool {
        if self.status.can_transition_to(next) {
            log::debug!("Transaction {}: {} -> {}", self.id, self.status, next);
            self.status = next;
            true
        } else {
            log::warn!(
                "Ignoring transition {} -> {} for transaction {}",
                self.status,
                next,
                self.id
            );
            false
        }
    }
}

fn new_local_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Parse a user-entered amount; must be a finite, positive number
pub fn parse_amount(input: &str) -> Result<f64, WalletError> {
    let amount = input
        .trim()
        .parse::<f64>()
        .map_err(|e| WalletError::InvalidInput(format!("Invalid amount '{}': {}", input, e)))?;
    validate_amount(amount)
}

/// Accept only finite, positive amounts
pub fn validate_amount(amount: f64) -> Result<f64, WalletError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(WalletError::InvalidInput(format!(
            "Amount must be a positive number, got {}",
            amount
        )));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(TransactionStatus::from_status_code("1"), TransactionStatus::Completed);
        assert_eq!(TransactionStatus::from_status_code("0"), TransactionStatus::Failed);
        assert_eq!(TransactionStatus::from_status_code(""), TransactionStatus::Unknown);
        assert_eq!(TransactionStatus::from_status_code("2"), TransactionStatus::Unknown);
    }

    #[test]
    fn test_lifecycle_transitions() {
        let mut tx = Transaction::new(Network::Polygon, "0xabc", 1.5);
        assert_eq!(tx.status, TransactionStatus::Pending);
        assert!(!tx.transition(TransactionStatus::Completed));
        assert!(tx.transition(TransactionStatus::Submitted));
        assert!(tx.transition(TransactionStatus::Completed));
        assert!(tx.status.is_terminal());
        assert!(!tx.transition(TransactionStatus::Failed));
        assert_eq!(tx.status, TransactionStatus::Completed);
    }

    #[test]
    fn test_random_ids_differ() {
        let a = Transaction::new(Network::Bitcoin, "addr", 1.0);
        let b = Transaction::new(Network::Bitcoin, "addr", 1.0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_deserialize_legacy_entry() {
        // Shape written by the earlier front-end: string amount, no network
        let json = r#"{"receiverAddress":"0xdead","amount":"12.5","status":"pending","id":"0.123"}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.amount, Amount::Text("12.5".to_string()));
        assert_eq!(tx.amount.value(), Some(12.5));
        assert!(!tx.local_id.is_empty());
        assert_eq!(tx.id, "0.123");
        assert_eq!(tx.network, Network::Bitcoin);
        assert_eq!(tx.status, TransactionStatus::Pending);
    }

    #[test]
    fn test_serialize_camel_case() {
        let tx = Transaction::new(Network::Polygon, "0xdead", 3.0);
        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["receiverAddress"], "0xdead");
        assert_eq!(value["amount"], 3.0);
        assert_eq!(value["status"], "pending");
        assert_eq!(value["network"], "polygon");
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 2.5 ").unwrap(), 2.5);
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("0").is_err());
        assert!(parse_amount("-1").is_err());
        assert!(parse_amount("NaN").is_err());
        assert!(parse_amount("inf").is_err());
        assert!(validate_amount(f64::INFINITY).is_err());
    }

    #[test]
    fn test_unreadable_amount_text_is_kept() {
        let json = r#"{"receiverAddress":"0xdead","amount":"","status":"failed","id":"0.2"}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.amount, Amount::Text(String::new()));
        assert_eq!(tx.amount.value(), None);

        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["amount"], "");
    }

    #[test]
    fn test_non_finite_amount_never_written_as_null() {
        let mut tx = Transaction::new(Network::Bitcoin, "addr", 1.0);
        tx.amount = Amount::Value(f64::NAN);
        let json = serde_json::to_string(&tx).unwrap();
        assert!(!json.contains("null"));

        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back.amount.value(), None);
    }
}
