//! Error types for the Cryptomus client

use thiserror::Error;

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, CryptomusError>;

/// Errors returned by the Cryptomus client
#[derive(Debug, Error)]
pub enum CryptomusError {
    /// The gateway answered with a non-success status.
    ///
    /// `message` holds the remote error body, pretty-printed when it is JSON.
    #[error("Gateway error (status {status}): {message}")]
    Gateway { status: u16, message: String },

    /// No response was received (DNS failure, refused connection, timeout)
    #[error("Transport unavailable: {0}")]
    Transport(String),

    /// Webhook signature is missing or does not match
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// Amount string is not a decimal number
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Invalid client configuration or credentials
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed URL
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl CryptomusError {
    /// Create a gateway error from a status code and raw response body
    pub fn gateway(status: u16, body: &str) -> Self {
        Self::Gateway {
            status,
            message: pretty_error_body(body),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create an invalid signature error
    pub fn invalid_signature(message: impl Into<String>) -> Self {
        Self::InvalidSignature(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// HTTP status of a gateway error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Gateway { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the gateway was reached at all
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Render a remote error body as 4-space indented JSON.
///
/// Bodies that are not JSON are returned verbatim.
fn pretty_error_body(body: &str) -> String {
    use serde::Serialize;

    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => return body.to_string(),
    };

    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    if value.serialize(&mut serializer).is_err() {
        return body.to_string();
    }
    String::from_utf8(out).unwrap_or_else(|_| body.to_string())
}
