//! Credentials and client configuration

use super::constants::{env as env_vars, DEFAULT_BASE_URL};
use super::endpoint::TokenKind;
use crate::{CryptomusError, Result};
use std::env;
use std::time::Duration;
use url::Url;

/// Merchant credentials.
///
/// Secrets are never printed; `Debug` redacts them.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    merchant_id: String,
    payment_secret: String,
    payout_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("merchant_id", &self.merchant_id)
            .field("payment_secret", &"<redacted>")
            .field("payout_secret", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Create credentials from a merchant id and the two API keys
    pub fn new(
        merchant_id: impl Into<String>,
        payment_secret: impl Into<String>,
        payout_secret: impl Into<String>,
    ) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            payment_secret: payment_secret.into(),
            payout_secret: payout_secret.into(),
        }
    }

    /// Read credentials from `CRYPTOMUS_MERCHANT_ID`, `CRYPTOMUS_PAYMENT_KEY`
    /// and `CRYPTOMUS_PAYOUT_KEY`. The payout key is optional.
    pub fn from_env() -> Result<Self> {
        let merchant_id = env::var(env_vars::MERCHANT_ID).map_err(|_| {
            CryptomusError::config(format!("Missing {}", env_vars::MERCHANT_ID))
        })?;
        let payment_secret = env::var(env_vars::PAYMENT_KEY).map_err(|_| {
            CryptomusError::config(format!("Missing {}", env_vars::PAYMENT_KEY))
        })?;
        let payout_secret = env::var(env_vars::PAYOUT_KEY).unwrap_or_default();

        let credentials = Self::new(merchant_id, payment_secret, payout_secret);
        credentials.validate()?;
        Ok(credentials)
    }

    /// Merchant identifier sent in the `Merchant` header
    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    /// Secret used to sign requests of the given kind
    pub fn secret_for(&self, token: TokenKind) -> &str {
        match token {
            TokenKind::Payment => &self.payment_secret,
            TokenKind::Payout => &self.payout_secret,
        }
    }

    /// Secret used to verify webhooks
    pub fn payment_secret(&self) -> &str {
        &self.payment_secret
    }

    /// Whether a payout key was supplied
    pub fn has_payout_secret(&self) -> bool {
        !self.payout_secret.is_empty()
    }

    /// Validate the credentials
    pub fn validate(&self) -> Result<()> {
        if self.merchant_id.is_empty() {
            return Err(CryptomusError::config("Merchant id cannot be empty"));
        }

        if self.payment_secret.is_empty() {
            return Err(CryptomusError::config("Payment key cannot be empty"));
        }

        Ok(())
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the gateway API
    pub base_url: String,
    /// Request timeout
    pub timeout: Option<Duration>,
    /// User agent for outgoing requests
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Create a new client config
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Validate the client configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(CryptomusError::config("Base URL cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(CryptomusError::config(
                "Base URL must start with http:// or https://",
            ));
        }

        self.base_url()?;
        Ok(())
    }

    /// Parsed base URL, normalized to end with `/` so paths join under it
    pub fn base_url(&self) -> Result<Url> {
        let mut base = self.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(Url::parse(&base)?)
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
