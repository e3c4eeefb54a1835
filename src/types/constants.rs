//! Protocol constants

/// Production API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.cryptomus.com/";

/// Header names used on every request
pub mod headers {
    /// Merchant identifier header
    pub const MERCHANT: &str = "Merchant";
    /// Request signature header
    pub const SIGN: &str = "Sign";
    /// Content type header
    pub const CONTENT_TYPE: &str = "Content-Type";
    /// Content type sent with every request
    pub const APPLICATION_JSON: &str = "application/json";
}

/// Environment variables read by [`Credentials::from_env`](crate::types::Credentials::from_env)
pub mod env {
    /// Merchant identifier
    pub const MERCHANT_ID: &str = "CRYPTOMUS_MERCHANT_ID";
    /// Payment API key
    pub const PAYMENT_KEY: &str = "CRYPTOMUS_PAYMENT_KEY";
    /// Payout API key
    pub const PAYOUT_KEY: &str = "CRYPTOMUS_PAYOUT_KEY";
}
