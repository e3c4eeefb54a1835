//! # Cryptomus Rust Client
//!
//! A **type-safe** Rust client for the Cryptomus crypto payment gateway.
//!
//! ## Features
//!
//! - 💳 **Invoices**: Create payments, look them up and refund them
//! - 👛 **Static wallets**: Create, block and refund deposit addresses, render QR codes
//! - 🔏 **Request signing**: Every call is signed with the gateway's MD5 scheme
//! - ✅ **Webhook verification**: Check the `sign` field of incoming webhooks
//! - 🔌 **Pluggable transport**: Bring your own HTTP stack through the [`Transport`] trait
//! - 🔒 **Type safety**: One typed request record per endpoint
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rust_cryptomus::{CreatePaymentRequest, Credentials, CryptomusClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CryptomusClient::new(Credentials::new(
//!         "merchant-uuid",
//!         "payment-key",
//!         "payout-key",
//!     ))?;
//!
//!     let invoice = client
//!         .create_payment(
//!             &CreatePaymentRequest::new("10", "USDT", "order-42")
//!                 .with_url_callback("https://example.com/cryptomus/webhook"),
//!         )
//!         .await?;
//!
//!     println!("Send the payer to {}", invoice.result.url);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`types`**: Request/response records, endpoint catalog, credentials and config
//! - **`client`**: [`CryptomusClient`], one method per gateway endpoint
//! - **`crypto`**: Request signing and webhook verification
//! - **`transport`**: HTTP transport trait and the `reqwest` implementation
//! - **`error`**: Error type and `Result` alias
//!
//! ## Optional Features
//!
//! - **`rustls-tls`** (default): TLS through rustls
//! - **`native-tls`**: TLS through the platform library

pub mod client;
pub mod crypto;
pub mod error;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use client::CryptomusClient;
pub use error::{CryptomusError, Result};
pub use transport::{ReqwestTransport, Transport};
pub use types::*;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
