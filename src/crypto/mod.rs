//! Request signing and webhook verification
//!
//! Every call to the gateway carries a `Sign` header computed from the JSON
//! body and one of the merchant's API keys. Webhooks sent by the gateway carry
//! the same kind of signature inside the body, under the `sign` key, computed
//! with the payment key.
//!
//! # Examples
//!
//! ## Signing a Request Body
//!
//! ```
//! use rust_cryptomus::crypto::signature;
//! use serde_json::json;
//!
//! let body = json!({"amount": "10", "currency": "USDT", "order_id": "abc"});
//! let sign = signature::sign_value(&body, "payment-secret");
//! assert_eq!(sign, "ba4b0e362517e39360d1011a11438b1b");
//! ```
//!
//! ## Verifying a Webhook
//!
//! ```
//! use rust_cryptomus::crypto::signature;
//! use serde_json::json;
//!
//! let webhook = json!({
//!     "amount": "10",
//!     "currency": "USDT",
//!     "order_id": "abc",
//!     "sign": "ba4b0e362517e39360d1011a11438b1b"
//! });
//! assert!(signature::verify(&webhook, "payment-secret"));
//! // the input still carries its sign field
//! assert!(webhook.get("sign").is_some());
//! ```
//!
//! # Caveats
//!
//! The digest is MD5 over a key-order-sensitive serialization. Both are fixed
//! by the gateway and cannot be changed without breaking interoperability.

pub mod signature;


pub use signature::{sign, sign_json, sign_value, verify, verify_webhook};
