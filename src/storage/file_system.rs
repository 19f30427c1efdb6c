use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::error::StorageError;

/// String key-value store backed by one file per key
#[derive(Clone, Debug)]
pub struct Storage {
    base_path: PathBuf,
}

impl Storage {
    /// Create storage rooted at `base_path`; the directory is created on first write
    pub fn new_with_base_dir(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn item_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid storage key: {:?}", key),
            )));
        }
        Ok(self.base_path.join(format!("{}.json", key)))
    }

    /// Read a raw entry, `None` if it was never written or was removed
    pub fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.item_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    /// Write a raw entry, creating the base directory on first use
    pub fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.item_path(key)?;
        fs::create_dir_all(&self.base_path)?;

        // Write-then-rename so a crash never leaves a truncated entry
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Remove an entry; removing a missing entry is not an error
    pub fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.item_path(key)?;
        if path.exists() {
            fs::remove_file(&path)?;
            log::debug!("Removed storage entry {:?}", path);
        }
        Ok(())
    }

    /// Load and decode a JSON entry
    pub fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.get_item(key)? {
            Some(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            None => Ok(None),
        }
    }

    /// Encode and save a JSON entry
    pub fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(value)?;
        self.set_item(key, &json)
    }

    /// List keys currently present in the storage directory
    pub fn keys(&self) -> Result<Vec<String>, StorageError> {
        if !self.base_path.exists() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_get_remove() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new_with_base_dir(temp_dir.path().join("nested"));

        assert_eq!(storage.get_item("greeting").unwrap(), None);
        storage.set_item("greeting", "hello").unwrap();
        assert_eq!(storage.get_item("greeting").unwrap().as_deref(), Some("hello"));
        assert_eq!(storage.keys().unwrap(), vec!["greeting".to_string()]);

        storage.remove_item("greeting").unwrap();
        assert_eq!(storage.get_item("greeting").unwrap(), None);
        // Removing twice is fine
        storage.remove_item("greeting").unwrap();
    }

    #[test]
    fn test_rejects_path_keys() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new_with_base_dir(temp_dir.path().to_path_buf());
        assert!(storage.set_item("../escape", "x").is_err());
        assert!(storage.get_item("").is_err());
    }

    #[test]
    fn test_json_entry() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new_with_base_dir(temp_dir.path().to_path_buf());
        storage.save_json("numbers", &vec![1, 2, 3]).unwrap();
        let loaded: Option<Vec<u32>> = storage.load_json("numbers").unwrap();
        assert_eq!(loaded, Some(vec![1, 2, 3]));

        storage.set_item("broken", "{not json").unwrap();
        let broken: Result<Option<Vec<u32>>, _> = storage.load_json("broken");
        assert!(matches!(broken, Err(StorageError::Json(_))));
    }
}
