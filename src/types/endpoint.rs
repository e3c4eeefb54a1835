//! Endpoint descriptors

use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP method of an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Get the method name
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether the body travels as query parameters instead of a payload
    pub fn uses_query(&self) -> bool {
        matches!(self, HttpMethod::Get)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for http::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => http::Method::GET,
            HttpMethod::Post => http::Method::POST,
            HttpMethod::Put => http::Method::PUT,
            HttpMethod::Patch => http::Method::PATCH,
            HttpMethod::Delete => http::Method::DELETE,
        }
    }
}

/// Which API key signs a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenKind {
    Payment,
    Payout,
}

/// A remote endpoint: method, signing key and path relative to the base URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub method: HttpMethod,
    pub token: TokenKind,
    pub path: &'static str,
}

impl Endpoint {
    /// Create a new endpoint descriptor
    pub const fn new(method: HttpMethod, token: TokenKind, path: &'static str) -> Self {
        Self {
            method,
            token,
            path,
        }
    }
}

/// Endpoint catalog
pub mod endpoints {
    use super::{Endpoint, HttpMethod, TokenKind};

    pub const CREATE_PAYMENT: Endpoint =
        Endpoint::new(HttpMethod::Post, TokenKind::Payment, "v1/payment");
    pub const CREATE_STATIC_WALLET: Endpoint =
        Endpoint::new(HttpMethod::Post, TokenKind::Payment, "v1/wallet");
    pub const GENERATE_QR: Endpoint =
        Endpoint::new(HttpMethod::Post, TokenKind::Payment, "v1/wallet/qr");
    pub const BLOCK_STATIC_WALLET: Endpoint = Endpoint::new(
        HttpMethod::Post,
        TokenKind::Payment,
        "v1/wallet/block-address",
    );
    pub const REFUND_BLOCKED_WALLET: Endpoint = Endpoint::new(
        HttpMethod::Post,
        TokenKind::Payment,
        "v1/wallet/blocked-address-refund",
    );
    pub const PAYMENT_INFO: Endpoint =
        Endpoint::new(HttpMethod::Post, TokenKind::Payment, "v1/payment/info");
    pub const REFUND_PAYMENT: Endpoint =
        Endpoint::new(HttpMethod::Post, TokenKind::Payment, "v1/payment/refund");
    pub const RESEND_WEBHOOK: Endpoint =
        Endpoint::new(HttpMethod::Post, TokenKind::Payment, "v1/payment/resend");
    pub const TEST_PAYMENT_WEBHOOK: Endpoint = Endpoint::new(
        HttpMethod::Post,
        TokenKind::Payment,
        "v1/test-webhook/payment",
    );
    pub const TEST_PAYOUT_WEBHOOK: Endpoint = Endpoint::new(
        HttpMethod::Post,
        TokenKind::Payout,
        "v1/test-webhook/payout",
    );

    /// Every endpoint the client exposes
    pub fn all() -> Vec<Endpoint> {
        vec![
            CREATE_PAYMENT,
            CREATE_STATIC_WALLET,
            GENERATE_QR,
            BLOCK_STATIC_WALLET,
            REFUND_BLOCKED_WALLET,
            PAYMENT_INFO,
            REFUND_PAYMENT,
            RESEND_WEBHOOK,
            TEST_PAYMENT_WEBHOOK,
            TEST_PAYOUT_WEBHOOK,
        ]
    }
}
