//! Cryptomus API client
//!
//! [`CryptomusClient`] holds the merchant credentials and exposes one method
//! per gateway endpoint. Each call serializes its typed options, signs the JSON
//! text with the key matching the endpoint's token kind, and hands the request
//! to a [`Transport`].
//!
//! # Examples
//!
//! ## Creating a Payment
//!
//! ```no_run
//! use rust_cryptomus::{CreatePaymentRequest, Credentials, CryptomusClient};
//!
//! # async fn example() -> rust_cryptomus::Result<()> {
//! let credentials = Credentials::new("merchant-uuid", "payment-key", "payout-key");
//! let client = CryptomusClient::new(credentials)?;
//!
//! let response = client
//!     .create_payment(&CreatePaymentRequest::new("10", "USDT", "order-1"))
//!     .await?;
//! println!("Pay at {}", response.result.url);
//! # Ok(())
//! # }
//! ```
//!
//! ## Handling a Webhook
//!
//! ```no_run
//! use rust_cryptomus::{Credentials, CryptomusClient};
//!
//! # fn example(raw_body: &str) -> rust_cryptomus::Result<()> {
//! let client = CryptomusClient::new(Credentials::from_env()?)?;
//!
//! let payload = client.parse_webhook(raw_body)?;
//! if payload.status.is_success() {
//!     println!("Order {} paid", payload.order_id);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom Transport
//!
//! ```no_run
//! use async_trait::async_trait;
//! use rust_cryptomus::transport::{Transport, TransportRequest, TransportResponse};
//! use rust_cryptomus::{ClientConfig, Credentials, CryptomusClient};
//!
//! struct Offline;
//!
//! #[async_trait]
//! impl Transport for Offline {
//!     async fn send(&self, _request: TransportRequest) -> rust_cryptomus::Result<TransportResponse> {
//!         Err(rust_cryptomus::CryptomusError::transport("offline"))
//!     }
//! }
//!
//! # fn example() -> rust_cryptomus::Result<()> {
//! let credentials = Credentials::new("merchant-uuid", "payment-key", "");
//! let client = CryptomusClient::with_transport(credentials, ClientConfig::default(), Offline)?;
//! # Ok(())
//! # }
//! ```

use crate::crypto::signature;
use crate::transport::{ReqwestTransport, Transport, TransportRequest};
use crate::types::{
    endpoints, headers, BlockStaticWalletRequest, BlockStaticWalletResponse, ClientConfig,
    CreatePaymentRequest, CreatePaymentResponse, CreateStaticWalletRequest,
    CreateStaticWalletResponse, Credentials, Endpoint, GenerateQrRequest, GenerateQrResponse,
    HttpMethod, PaymentInfoRequest, PaymentInfoResponse, PaymentRefundRequest,
    PaymentRefundResponse, RefundBlockedWalletRequest, RefundBlockedWalletResponse,
    ResendWebhookRequest, ResendWebhookResponse, TestWebhookRequest, TestWebhookResponse,
    TokenKind, WebhookPayload,
};
use crate::{CryptomusError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

#[cfg(test)]
mod tests;

/// Client for the Cryptomus merchant API
pub struct CryptomusClient<T: Transport = ReqwestTransport> {
    /// Merchant id and API keys
    credentials: Arc<Credentials>,
    /// Base URL, always ending with `/`
    base_url: Url,
    /// HTTP transport
    transport: Arc<T>,
}

impl<T: Transport> Clone for CryptomusClient<T> {
    fn clone(&self) -> Self {
        Self {
            credentials: Arc::clone(&self.credentials),
            base_url: self.base_url.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: Transport> std::fmt::Debug for CryptomusClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptomusClient")
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url.as_str())
            .field("transport", &"<transport>")
            .finish()
    }
}

impl CryptomusClient<ReqwestTransport> {
    /// Create a client for the production API
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a client with a custom configuration
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(&config)?;
        Self::with_transport(credentials, config, transport)
    }
}

impl<T: Transport> CryptomusClient<T> {
    /// Create a client that sends requests through the given transport
    pub fn with_transport(credentials: Credentials, config: ClientConfig, transport: T) -> Result<Self> {
        credentials.validate()?;
        config.validate()?;

        Ok(Self {
            credentials: Arc::new(credentials),
            base_url: config.base_url()?,
            transport: Arc::new(transport),
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Merchant id sent with every request
    pub fn merchant_id(&self) -> &str {
        self.credentials.merchant_id()
    }

    /// Send a signed request and parse the response.
    ///
    /// GET requests carry the body as query parameters, every other method
    /// sends it as the JSON payload. The signature always covers the JSON text.
    /// A GET body must serialize to a JSON object; anything else is a
    /// [`CryptomusError::Config`] error and nothing is sent.
    pub async fn request<B, R>(
        &self,
        method: HttpMethod,
        token: TokenKind,
        path: &str,
        body: &B,
    ) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        if token == TokenKind::Payout && !self.credentials.has_payout_secret() {
            return Err(CryptomusError::config(
                "Payout key is required for payout endpoints",
            ));
        }

        let body = serde_json::to_value(body)?;
        if method.uses_query() && !body.is_object() {
            return Err(CryptomusError::config(
                "GET request body must be a JSON object",
            ));
        }

        let json = body.to_string();
        let sign = signature::sign_json(&json, self.credentials.secret_for(token));
        let url = self.base_url.join(path)?;

        let (query, payload) = if method.uses_query() {
            (query_pairs(&body), None)
        } else {
            (Vec::new(), Some(json))
        };

        let request = TransportRequest {
            method,
            url: url.to_string(),
            query,
            payload,
            headers: vec![
                (
                    headers::CONTENT_TYPE.to_string(),
                    headers::APPLICATION_JSON.to_string(),
                ),
                (
                    headers::MERCHANT.to_string(),
                    self.credentials.merchant_id().to_string(),
                ),
                (headers::SIGN.to_string(), sign),
            ],
        };

        tracing::debug!("Sending {} request to: {}", method, url);

        let response = self.transport.send(request).await?;

        if !response.is_success() {
            tracing::error!(
                "Cryptomus {} {} failed with status: {}. Response body: {}",
                method,
                path,
                response.status,
                response.body
            );
            return Err(CryptomusError::gateway(response.status, &response.body));
        }

        Ok(serde_json::from_str(&response.body)?)
    }

    /// Send a request to a catalog endpoint
    pub async fn call<B, R>(&self, endpoint: Endpoint, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.request(endpoint.method, endpoint.token, endpoint.path, body)
            .await
    }

    /// Create an invoice
    pub async fn create_payment(
        &self,
        options: &CreatePaymentRequest,
    ) -> Result<CreatePaymentResponse> {
        self.call(endpoints::CREATE_PAYMENT, options).await
    }

    /// Create a static wallet
    pub async fn create_static_wallet(
        &self,
        options: &CreateStaticWalletRequest,
    ) -> Result<CreateStaticWalletResponse> {
        self.call(endpoints::CREATE_STATIC_WALLET, options).await
    }

    /// Generate a QR code for a static wallet
    pub async fn generate_qr(&self, options: &GenerateQrRequest) -> Result<GenerateQrResponse> {
        self.call(endpoints::GENERATE_QR, options).await
    }

    /// Block a static wallet
    pub async fn block_static_wallet(
        &self,
        options: &BlockStaticWalletRequest,
    ) -> Result<BlockStaticWalletResponse> {
        self.call(endpoints::BLOCK_STATIC_WALLET, options).await
    }

    /// Refund the balance of a blocked static wallet
    pub async fn refund_blocked_wallet(
        &self,
        options: &RefundBlockedWalletRequest,
    ) -> Result<RefundBlockedWalletResponse> {
        self.call(endpoints::REFUND_BLOCKED_WALLET, options).await
    }

    /// Get invoice details
    pub async fn payment_info(&self, options: &PaymentInfoRequest) -> Result<PaymentInfoResponse> {
        self.call(endpoints::PAYMENT_INFO, options).await
    }

    /// Refund a paid invoice
    pub async fn refund_payment(
        &self,
        options: &PaymentRefundRequest,
    ) -> Result<PaymentRefundResponse> {
        self.call(endpoints::REFUND_PAYMENT, options).await
    }

    /// Resend the last webhook of an invoice
    pub async fn resend_webhook(
        &self,
        options: &ResendWebhookRequest,
    ) -> Result<ResendWebhookResponse> {
        self.call(endpoints::RESEND_WEBHOOK, options).await
    }

    /// Send a sample payment webhook
    pub async fn test_payment_webhook(
        &self,
        options: &TestWebhookRequest,
    ) -> Result<TestWebhookResponse> {
        self.call(endpoints::TEST_PAYMENT_WEBHOOK, options).await
    }

    /// Send a sample payout webhook, signed with the payout key
    pub async fn test_payout_webhook(
        &self,
        options: &TestWebhookRequest,
    ) -> Result<TestWebhookResponse> {
        self.call(endpoints::TEST_PAYOUT_WEBHOOK, options).await
    }

    /// Check the `sign` field of a webhook body against the payment key.
    ///
    /// The value is not modified.
    pub fn verify_signature(&self, body_with_sign: &Value) -> bool {
        signature::verify(body_with_sign, self.credentials.payment_secret())
    }

    /// Verify a raw webhook body and parse it
    pub fn parse_webhook(&self, raw_body: &str) -> Result<WebhookPayload> {
        signature::verify_webhook(raw_body, self.credentials.payment_secret())
    }
}

/// Flatten a JSON object into query parameters, keeping field order
fn query_pairs(body: &Value) -> Vec<(String, String)> {
    let Some(object) = body.as_object() else {
        return Vec::new();
    };

    object
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), value)
        })
        .collect()
}
