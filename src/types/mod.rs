//! Core types for the Cryptomus API
//!
//! Request records serialize their fields in declaration order and omit unset
//! optional fields. That serialized text is what gets signed, so the field
//! order of every request struct is part of the wire contract.
//!
//! # Architecture
//!
//! - [`endpoint`] - Endpoint descriptors and the endpoint catalog
//! - [`config`] - Merchant credentials and client configuration
//! - [`payment`] - Invoice requests, responses and statuses
//! - [`wallet`] - Static wallet requests and responses
//! - [`webhook`] - Webhook resend/test requests and the webhook payload
//! - [`constants`] - Base URL, header names and environment variables
//!
//! # Examples
//!
//! ```
//! use rust_cryptomus::types::{CreatePaymentRequest, Currency};
//!
//! let request = CreatePaymentRequest::new("10", "USDT", "order-1")
//!     .with_url_callback("https://example.com/hook")
//!     .with_currencies(vec![Currency::new("USDT").with_network("tron")]);
//!
//! let json = serde_json::to_string(&request).unwrap();
//! assert!(json.starts_with(r#"{"amount":"10","currency":"USDT","order_id":"order-1""#));
//! ```

pub mod config;
pub mod constants;
pub mod endpoint;
pub mod payment;
pub mod wallet;
pub mod webhook;

// Re-export commonly used types
pub use config::{ClientConfig, Credentials};
pub use constants::{headers, DEFAULT_BASE_URL};
pub use endpoint::{endpoints, Endpoint, HttpMethod, TokenKind};
pub use payment::{
    ApiResponse, CourseSource, CreatePaymentRequest, CreatePaymentResponse, Currency,
    EmptyResult, Payment, PaymentInfoRequest, PaymentInfoResponse, PaymentRefundRequest,
    PaymentRefundResponse, PaymentStatus,
};
pub use wallet::{
    BlockStaticWalletRequest, BlockStaticWalletResponse, BlockedWallet, BlockedWalletRefund,
    CreateStaticWalletRequest, CreateStaticWalletResponse, GenerateQrRequest,
    GenerateQrResponse, QrCode, RefundBlockedWalletRequest, RefundBlockedWalletResponse,
    StaticWallet, StaticWalletStatus,
};
pub use webhook::{
    ResendWebhookRequest, ResendWebhookResponse, TestWebhookRequest, TestWebhookResponse,
    WebhookPayload,
};
