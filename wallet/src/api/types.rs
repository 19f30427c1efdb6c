use serde::{Deserialize, Serialize};
use wallet_core::{AddressCheck, Network, Prices};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportWalletRequest {
    pub network: Network,
    pub private_key: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImportWalletResponse {
    pub network: Network,
    pub status: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct VerifyAddressRequest {
    pub address: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyAddressResponse {
    pub network: Network,
    pub address: String,
    pub result: AddressCheck,
}

/// Send form; `amount` is the raw text the user typed
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTransactionRequest {
    pub receiver_address: String,
    pub amount: String,
}

#[derive(Debug, Serialize)]
pub struct SwitchNetworkResponse {
    pub network: Network,
    pub prices: Prices,
}

#[derive(Debug, Serialize)]
pub struct RefreshPricesResponse {
    pub network: Network,
    pub prices: Prices,
    /// False when the lookup failed and cached prices were kept
    pub refreshed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TotalAmountResponse {
    pub total: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionLinkResponse {
    pub id: String,
    pub url: String,
}
