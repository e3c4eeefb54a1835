//! Signature utilities
//!
//! A signature is `md5(base64(escape_slashes(json)) + secret)` rendered as
//! lowercase hex. The JSON text keeps the key order the body was built with;
//! both sides of the protocol must serialize fields in the same order.

use crate::types::WebhookPayload;
use crate::{CryptomusError, Result};
use base64::{engine::general_purpose, Engine as _};
use md5::{Digest, Md5};
use serde::Serialize;
use serde_json::Value;
use subtle::ConstantTimeEq;

/// Name of the signature field in webhook bodies
pub const SIGN_FIELD: &str = "sign";

/// Length of a rendered signature in hex characters
pub const SIGNATURE_LEN: usize = 32;

/// Sign any serializable body with the given secret
pub fn sign<T: Serialize + ?Sized>(body: &T, secret: &str) -> Result<String> {
    let json = serde_json::to_string(body)?;
    Ok(sign_json(&json, secret))
}

/// Sign an already-built JSON value
pub fn sign_value(body: &Value, secret: &str) -> String {
    sign_json(&body.to_string(), secret)
}

/// Sign compact JSON text exactly as it will be sent
pub fn sign_json(json: &str, secret: &str) -> String {
    let escaped = json.replace('/', "\\/");
    let encoded = general_purpose::STANDARD.encode(escaped.as_bytes());

    let mut hasher = Md5::new();
    hasher.update(encoded.as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Verify a body carrying its own `sign` field.
///
/// The caller's value is left untouched; the field is stripped from a copy.
/// Returns `false` for non-objects, a missing `sign`, or a non-string `sign`.
pub fn verify(body_with_sign: &Value, secret: &str) -> bool {
    let Some(object) = body_with_sign.as_object() else {
        return false;
    };

    let mut remaining = object.clone();
    let Some(Value::String(claimed)) = remaining.shift_remove(SIGN_FIELD) else {
        return false;
    };

    let expected = sign_value(&Value::Object(remaining), secret);
    claimed.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Verify a raw webhook body and deserialize it
pub fn verify_webhook(raw_body: &str, secret: &str) -> Result<WebhookPayload> {
    let value: Value = serde_json::from_str(raw_body)?;

    match value.get(SIGN_FIELD) {
        Some(Value::String(_)) => {}
        Some(_) => {
            return Err(CryptomusError::invalid_signature(
                "Webhook sign field is not a string",
            ))
        }
        None => {
            return Err(CryptomusError::invalid_signature(
                "Webhook body has no sign field",
            ))
        }
    }

    if !verify(&value, secret) {
        tracing::warn!("Rejected webhook with mismatched signature");
        return Err(CryptomusError::invalid_signature(
            "Webhook signature does not match",
        ));
    }

    Ok(serde_json::from_value(value)?)
}
