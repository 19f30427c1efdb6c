use std::fmt;

use serde::Serialize;

use crate::error::WalletError;
use crate::network::Network;

pub const PRIVATE_KEY_LENGTH: usize = 64;

/// Imported credential placeholder. The key is only length-checked and
/// never used for signing.
#[derive(Clone, Serialize)]
pub struct Wallet {
    pub network: Network,
    #[serde(skip_serializing)]
    private_key: String,
}

impl Wallet {
    pub fn import(network: Network, private_key: &str) -> Result<Self, WalletError> {
        let length = private_key.chars().count();
        if length != PRIVATE_KEY_LENGTH {
            return Err(WalletError::InvalidPrivateKey {
                network: network.to_string(),
                length,
            });
        }
        Ok(Self {
            network,
            private_key: private_key.to_string(),
        })
    }

    pub fn private_key(&self) -> &str {
        &self.private_key
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("network", &self.network)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_checks_length() {
        let key = "a".repeat(64);
        let wallet = Wallet::import(Network::Bitcoin, &key).unwrap();
        assert_eq!(wallet.network, Network::Bitcoin);
        assert_eq!(wallet.private_key(), key);

        let err = Wallet::import(Network::Polygon, "abc").unwrap_err();
        assert!(matches!(err, WalletError::InvalidPrivateKey { length: 3, .. }));
    }

    #[test]
    fn test_key_length_counts_characters() {
        // 64 bytes but 32 characters
        let err = Wallet::import(Network::Bitcoin, &"é".repeat(32)).unwrap_err();
        assert!(matches!(err, WalletError::InvalidPrivateKey { length: 32, .. }));

        let wallet = Wallet::import(Network::Bitcoin, &"é".repeat(64)).unwrap();
        assert_eq!(wallet.private_key().chars().count(), 64);
    }

    #[test]
    fn test_debug_redacts_key() {
        let wallet = Wallet::import(Network::Polygon, &"f".repeat(64)).unwrap();
        let debug = format!("{:?}", wallet);
        assert!(debug.contains("redacted"));
        assert!(!debug.contains("ffff"));
    }
}
