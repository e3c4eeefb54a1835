//! Static wallet types

use super::payment::{parse_amount, ApiResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Create a persistent deposit address bound to an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateStaticWalletRequest {
    pub currency: String,
    pub order_id: String,
    pub network: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_callback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_referral_code: Option<String>,
}

impl CreateStaticWalletRequest {
    /// Create a request with the required fields
    pub fn new(
        currency: impl Into<String>,
        order_id: impl Into<String>,
        network: impl Into<String>,
    ) -> Self {
        Self {
            currency: currency.into(),
            order_id: order_id.into(),
            network: network.into(),
            url_callback: None,
            from_referral_code: None,
        }
    }

    /// Set the webhook URL
    pub fn with_url_callback(mut self, url: impl Into<String>) -> Self {
        self.url_callback = Some(url.into());
        self
    }
}

/// A static wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticWallet {
    pub wallet_uuid: String,
    pub uuid: String,
    pub address: String,
    pub network: String,
    pub currency: String,
    pub url: String,
}

/// Response of the create static wallet endpoint
pub type CreateStaticWalletResponse = ApiResponse<StaticWallet>;

/// Generate a QR code for a static wallet address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateQrRequest {
    pub wallet_address_uuid: String,
}

impl GenerateQrRequest {
    pub fn new(wallet_address_uuid: impl Into<String>) -> Self {
        Self {
            wallet_address_uuid: wallet_address_uuid.into(),
        }
    }
}

/// QR code image, as a `data:image/png;base64,...` URI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrCode {
    pub image: String,
}

/// Response of the generate QR endpoint
pub type GenerateQrResponse = ApiResponse<QrCode>;

/// Static wallet status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaticWalletStatus {
    Blocked,
    Active,
    InActive,
}

/// Block a static wallet by uuid or order id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockStaticWalletRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Refund every incoming payment to the sender
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_force_refund: Option<bool>,
}

/// Result of blocking a wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedWallet {
    pub uuid: String,
    pub status: StaticWalletStatus,
}

/// Response of the block static wallet endpoint
pub type BlockStaticWalletResponse = ApiResponse<BlockedWallet>;

/// Refund the balance of a blocked wallet to an address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundBlockedWalletRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    pub address: String,
}

/// Result of refunding a blocked wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedWalletRefund {
    pub commission: String,
    pub amount: String,
}

impl BlockedWalletRefund {
    /// Refunded amount as a decimal
    pub fn amount_as_decimal(&self) -> crate::Result<Decimal> {
        parse_amount(&self.amount)
    }

    /// Fee charged for the refund as a decimal
    pub fn commission_as_decimal(&self) -> crate::Result<Decimal> {
        parse_amount(&self.commission)
    }
}

/// Response of the blocked wallet refund endpoint
pub type RefundBlockedWalletResponse = ApiResponse<BlockedWalletRefund>;
