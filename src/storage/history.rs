//! Persisted transaction history
//!
//! The whole list lives under a single key as a JSON array and is rewritten
//! on every mutation.

use super::file_system::Storage;
use crate::error::StorageError;
use crate::transaction::Transaction;

pub const HISTORY_KEY: &str = "transactionHistory";

/// Prefix of entries holding history text that could not be fully read
pub const UNREADABLE_PREFIX: &str = "transactionHistory-unreadable-";

/// Load the persisted history
///
/// Entries that fail to decode are skipped and logged. Whenever anything
/// is skipped the raw text is copied to an `UNREADABLE_PREFIX` entry first,
/// so a later save cannot destroy it.
pub fn load_history(storage: &Storage) -> Result<Vec<Transaction>, StorageError> {
    let Some(raw) = storage.get_item(HISTORY_KEY)? else {
        return Ok(Vec::new());
    };

    let entries: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(e) => {
            log::error!("Transaction history is not a JSON array: {}", e);
            back_up_unreadable(storage, &raw)?;
            return Ok(Vec::new());
        }
    };

    let total = entries.len();
    let history: Vec<Transaction> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(tx) => Some(tx),
            Err(e) => {
                log::warn!("Skipping unreadable transaction #{}: {}", index, e);
                None
            }
        })
        .collect();

    if history.len() < total {
        back_up_unreadable(storage, &raw)?;
    }
    Ok(history)
}

fn back_up_unreadable(storage: &Storage, raw: &str) -> Result<(), StorageError> {
    for key in storage.keys()? {
        if key.starts_with(UNREADABLE_PREFIX)
            && storage.get_item(&key)?.as_deref() == Some(raw)
        {
            log::debug!("Unreadable history already kept as {}", key);
            return Ok(());
        }
    }

    let key = format!(
        "{}{}",
        UNREADABLE_PREFIX,
        chrono::Utc::now().format("%Y%m%dT%H%M%S%3f")
    );
    storage.set_item(&key, raw)?;
    log::warn!("Kept unreadable transaction history as {}", key);
    Ok(())
}

pub fn save_history(storage: &Storage, history: &[Transaction]) -> Result<(), StorageError> {
    storage.save_json(HISTORY_KEY, history)?;
    log::debug!("Persisted {} transaction(s)", history.len());
    Ok(())
}

pub fn erase_history(storage: &Storage) -> Result<(), StorageError> {
    storage.remove_item(HISTORY_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Network;
    use crate::transaction::TransactionStatus;
    use tempfile::TempDir;

    #[test]
    fn test_history_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new_with_base_dir(temp_dir.path().to_path_buf());

        let mut tx = Transaction::new(Network::Bitcoin, "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa", 5.0);
        tx.id = "1".to_string();
        let history = vec![tx];

        save_history(&storage, &history).unwrap();
        assert_eq!(load_history(&storage).unwrap(), history);
    }

    #[test]
    fn test_missing_history_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new_with_base_dir(temp_dir.path().to_path_buf());
        assert!(load_history(&storage).unwrap().is_empty());
    }

    #[test]
    fn test_erase_history() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new_with_base_dir(temp_dir.path().to_path_buf());
        let tx = Transaction::new(Network::Polygon, "0xabc", 1.0);
        save_history(&storage, &[tx]).unwrap();

        erase_history(&storage).unwrap();
        assert!(storage.get_item(HISTORY_KEY).unwrap().is_none());
        assert!(load_history(&storage).unwrap().is_empty());
    }

    #[test]
    fn test_reads_legacy_array() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new_with_base_dir(temp_dir.path().to_path_buf());
        storage
            .set_item(
                HISTORY_KEY,
                r#"[{"receiverAddress":"0xdead","amount":"5","status":"pending","id":"0.42"}]"#,
            )
            .unwrap();

        let history = load_history(&storage).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].amount.value(), Some(5.0));
        assert_eq!(history[0].status, TransactionStatus::Pending);
    }

    #[test]
    fn test_bad_entry_is_skipped_and_kept() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new_with_base_dir(temp_dir.path().to_path_buf());
        let raw = r#"[{"receiverAddress":"0xa","amount":"5","status":"pending","id":"0.1"},
            {"receiverAddress":"0xb","amount":null,"status":"pending","id":"0.2"}]"#;
        storage.set_item(HISTORY_KEY, raw).unwrap();

        let history = load_history(&storage).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, "0.1");

        let backups: Vec<String> = storage
            .keys()
            .unwrap()
            .into_iter()
            .filter(|key| key.starts_with(UNREADABLE_PREFIX))
            .collect();
        assert_eq!(backups.len(), 1);
        assert_eq!(storage.get_item(&backups[0]).unwrap().as_deref(), Some(raw));

        // Loading again does not pile up copies
        load_history(&storage).unwrap();
        let count = storage
            .keys()
            .unwrap()
            .iter()
            .filter(|key| key.starts_with(UNREADABLE_PREFIX))
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_garbage_file_is_kept() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new_with_base_dir(temp_dir.path().to_path_buf());
        storage.set_item(HISTORY_KEY, "{not json").unwrap();

        assert!(load_history(&storage).unwrap().is_empty());
        let kept = storage
            .keys()
            .unwrap()
            .into_iter()
            .any(|key| key.starts_with(UNREADABLE_PREFIX));
        assert!(kept);
    }
}
