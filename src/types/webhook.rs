//! Webhook types

use super::payment::{parse_amount, string_or_number, ApiResponse, EmptyResult, PaymentStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ask the gateway to deliver the last webhook of an invoice again
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResendWebhookRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

/// Response of the resend webhook endpoint
pub type ResendWebhookResponse = ApiResponse<EmptyResult>;

/// Ask the gateway to send a sample webhook to a URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestWebhookRequest {
    pub url_callback: String,
    pub currency: String,
    pub network: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    pub status: PaymentStatus,
}

impl TestWebhookRequest {
    /// Create a test webhook request
    pub fn new(
        url_callback: impl Into<String>,
        currency: impl Into<String>,
        network: impl Into<String>,
        status: PaymentStatus,
    ) -> Self {
        Self {
            url_callback: url_callback.into(),
            currency: currency.into(),
            network: network.into(),
            uuid: None,
            order_id: None,
            status,
        }
    }

    /// Attach the sample to an existing order
    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }
}

/// Response of the test webhook endpoints
pub type TestWebhookResponse = ApiResponse<EmptyResult>;

/// Payment webhook body, after its signature has been checked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookPayload {
    /// `payment` or `wallet`
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub uuid: Option<String>,
    pub order_id: String,
    #[serde(default, with = "string_or_number")]
    pub amount: Option<String>,
    #[serde(default, with = "string_or_number")]
    pub payment_amount: Option<String>,
    #[serde(default, with = "string_or_number")]
    pub payment_amount_usd: Option<String>,
    #[serde(default, with = "string_or_number")]
    pub merchant_amount: Option<String>,
    #[serde(default, with = "string_or_number")]
    pub commission: Option<String>,
    #[serde(default)]
    pub is_final: bool,
    pub status: PaymentStatus,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub wallet_address_uuid: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub payer_currency: Option<String>,
    #[serde(default)]
    pub additional_data: Option<String>,
    #[serde(default)]
    pub txid: Option<String>,
    #[serde(default)]
    pub sign: Option<String>,
    /// Fields not modelled above (e.g. `convert`)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WebhookPayload {
    /// Amount credited to the merchant, if reported
    pub fn merchant_amount_as_decimal(&self) -> crate::Result<Option<Decimal>> {
        self.merchant_amount.as_deref().map(parse_amount).transpose()
    }
}
