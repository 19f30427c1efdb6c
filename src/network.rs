//! Supported ledgers and per-network receiver address checks

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::WalletError;

/// One of the two ledgers the wallet switches between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Bitcoin,
    Polygon,
}

impl Network {
    pub const ALL: [Network; 2] = [Network::Bitcoin, Network::Polygon];

    /// The other supported network
    pub fn toggle(self) -> Self {
        match self {
            Network::Bitcoin => Network::Polygon,
            Network::Polygon => Network::Bitcoin,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Bitcoin => "bitcoin",
            Network::Polygon => "polygon",
        }
    }

    /// Check a receiver address against this network's format rules
    ///
    /// Bitcoin addresses must parse and belong to `bitcoin_network`.
    /// Polygon has no format rules yet and always reports `Unsupported`.
    pub fn verify_address(&self, address: &str, bitcoin_network: bitcoin::Network) -> AddressCheck {
        match self {
            Network::Bitcoin => {
                match bitcoin::Address::from_str(address.trim()) {
                    Ok(parsed) if parsed.is_valid_for_network(bitcoin_network) => {
                        AddressCheck::Valid
                    }
                    Ok(_) => {
                        log::debug!(
                            "Address {} is not valid for bitcoin network {}",
                            address,
                            bitcoin_network
                        );
                        AddressCheck::Invalid
                    }
                    Err(e) => {
                        log::debug!("Address {} failed to parse: {}", address, e);
                        AddressCheck::Invalid
                    }
                }
            }
            Network::Polygon => AddressCheck::Unsupported,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bitcoin" => Ok(Network::Bitcoin),
            "polygon" => Ok(Network::Polygon),
            other => Err(WalletError::UnsupportedNetwork(other.to_string())),
        }
    }
}

/// Outcome of a receiver address format check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressCheck {
    Valid,
    Invalid,
    /// The current network has no address rules
    Unsupported,
}

impl AddressCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, AddressCheck::Valid)
    }
}
