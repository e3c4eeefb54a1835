//! Payment-related types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Envelope returned by every endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// `0` on success
    pub state: i64,
    /// Endpoint-specific result
    pub result: T,
}

impl<T> ApiResponse<T> {
    /// Whether the gateway reported success
    pub fn is_ok(&self) -> bool {
        self.state == 0
    }
}

/// Result of endpoints that answer with `"result": []`
pub type EmptyResult = Vec<serde_json::Value>;

/// Payment status reported by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    PaidOver,
    WrongAmount,
    Process,
    ConfirmCheck,
    WrongAmountWaiting,
    Check,
    Fail,
    Cancel,
    SystemFail,
    RefundProcess,
    RefundFail,
    RefundPaid,
    Locked,
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    /// Whether the invoice was paid in full (or more)
    pub fn is_success(&self) -> bool {
        matches!(self, PaymentStatus::Paid | PaymentStatus::PaidOver)
    }

    /// Whether the status can no longer change
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            PaymentStatus::Paid
                | PaymentStatus::PaidOver
                | PaymentStatus::WrongAmount
                | PaymentStatus::Fail
                | PaymentStatus::Cancel
                | PaymentStatus::SystemFail
                | PaymentStatus::RefundFail
                | PaymentStatus::RefundPaid
        )
    }
}

/// Exchange rate source used to convert the invoice amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseSource {
    Binance,
    BinanceP2P,
    Exmo,
    Kucoin,
    Garantexio,
}

/// Currency and optional network pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
}

impl Currency {
    /// Create a currency entry without a network restriction
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            network: None,
        }
    }

    /// Restrict the currency to a network
    pub fn with_network(mut self, network: impl Into<String>) -> Self {
        self.network = Some(network.into());
        self
    }
}

/// Options for creating an invoice.
///
/// Field order is the order the body is serialized and signed in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatePaymentRequest {
    /// Amount to be paid, as a decimal string
    pub amount: String,
    /// Invoice currency code
    pub currency: String,
    /// Merchant-side order identifier
    pub order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_return: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_success: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_callback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_payment_multiple: Option<bool>,
    /// Invoice lifetime in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifetime: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_currency: Option<String>,
    /// Percentage of the fee charged to the payer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtract: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy_payment_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currencies: Option<Vec<Currency>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub except_currencies: Option<Vec<Currency>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_source: Option<CourseSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_referral_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_refresh: Option<bool>,
}

impl CreatePaymentRequest {
    /// Create a request with the three required fields
    pub fn new(
        amount: impl Into<String>,
        currency: impl Into<String>,
        order_id: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            currency: currency.into(),
            order_id: order_id.into(),
            ..Default::default()
        }
    }

    /// Set the blockchain network
    pub fn with_network(mut self, network: impl Into<String>) -> Self {
        self.network = Some(network.into());
        self
    }

    /// Set the URL the payer returns to before paying
    pub fn with_url_return(mut self, url: impl Into<String>) -> Self {
        self.url_return = Some(url.into());
        self
    }

    /// Set the URL the payer is sent to after paying
    pub fn with_url_success(mut self, url: impl Into<String>) -> Self {
        self.url_success = Some(url.into());
        self
    }

    /// Set the webhook URL
    pub fn with_url_callback(mut self, url: impl Into<String>) -> Self {
        self.url_callback = Some(url.into());
        self
    }

    /// Set the invoice lifetime in seconds
    pub fn with_lifetime(mut self, seconds: u64) -> Self {
        self.lifetime = Some(seconds);
        self
    }

    /// Convert the invoice into another currency
    pub fn with_to_currency(mut self, currency: impl Into<String>) -> Self {
        self.to_currency = Some(currency.into());
        self
    }

    /// Attach merchant data echoed back in webhooks
    pub fn with_additional_data(mut self, data: impl Into<String>) -> Self {
        self.additional_data = Some(data.into());
        self
    }

    /// Restrict the currencies the payer may choose from
    pub fn with_currencies(mut self, currencies: Vec<Currency>) -> Self {
        self.currencies = Some(currencies);
        self
    }

    /// Exclude currencies from the payment form
    pub fn with_except_currencies(mut self, currencies: Vec<Currency>) -> Self {
        self.except_currencies = Some(currencies);
        self
    }

    /// Set the exchange rate source
    pub fn with_course_source(mut self, source: CourseSource) -> Self {
        self.course_source = Some(source);
        self
    }

    /// Set the payer fee share in percent
    pub fn with_subtract(mut self, percent: u32) -> Self {
        self.subtract = Some(percent);
        self
    }

    /// Set the discount (negative) or surcharge (positive) percentage
    pub fn with_discount_percent(mut self, percent: i32) -> Self {
        self.discount_percent = Some(percent);
        self
    }
}

/// Invoice as reported by the gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub uuid: String,
    pub order_id: String,
    pub amount: String,
    #[serde(default, with = "string_or_number")]
    pub payment_amount: Option<String>,
    #[serde(default, with = "string_or_number")]
    pub payer_amount: Option<String>,
    #[serde(default)]
    pub discount_percent: Option<f64>,
    #[serde(default, with = "string_or_number")]
    pub discount: Option<String>,
    #[serde(default)]
    pub payer_currency: Option<String>,
    pub currency: String,
    #[serde(default, with = "string_or_number")]
    pub merchant_amount: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub txid: Option<String>,
    pub payment_status: PaymentStatus,
    pub url: String,
    /// Expiry, as sent by the gateway (unix timestamp or date string)
    #[serde(default, with = "string_or_number")]
    pub expired_at: Option<String>,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default)]
    pub additional_data: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Payment {
    /// Get the invoice amount as a decimal
    pub fn amount_as_decimal(&self) -> crate::Result<Decimal> {
        parse_amount(&self.amount)
    }

    /// Get the amount actually paid, if any
    pub fn payment_amount_as_decimal(&self) -> crate::Result<Option<Decimal>> {
        self.payment_amount.as_deref().map(parse_amount).transpose()
    }
}

pub(crate) fn parse_amount(amount: &str) -> crate::Result<Decimal> {
    amount
        .parse()
        .map_err(|_| crate::CryptomusError::InvalidAmount(amount.to_string()))
}

/// Response of the create payment endpoint
pub type CreatePaymentResponse = ApiResponse<Payment>;

/// Response of the payment info endpoint
pub type PaymentInfoResponse = ApiResponse<Payment>;

/// Look up an invoice by uuid or order id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInfoRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

impl PaymentInfoRequest {
    /// Look up by invoice uuid
    pub fn by_uuid(uuid: impl Into<String>) -> Self {
        Self {
            uuid: Some(uuid.into()),
            order_id: None,
        }
    }

    /// Look up by merchant order id
    pub fn by_order_id(order_id: impl Into<String>) -> Self {
        Self {
            uuid: None,
            order_id: Some(order_id.into()),
        }
    }
}

/// Refund a paid invoice to an address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRefundRequest {
    /// Destination address of the refund
    pub address: String,
    /// Take the refund fee from the merchant balance instead of the refunded amount
    pub is_subtract: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

/// Response of the refund endpoint
pub type PaymentRefundResponse = ApiResponse<EmptyResult>;

/// Accepts a string or a number and keeps it as text
pub(crate) mod string_or_number {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        value.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        })
    }
}
