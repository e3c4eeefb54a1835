//! Tests for the Cryptomus client

use super::CryptomusClient;
use crate::crypto::signature;
use crate::transport::{Transport, TransportRequest, TransportResponse};
use crate::types::{
    endpoints, ApiResponse, BlockStaticWalletRequest, ClientConfig, CreatePaymentRequest,
    CreateStaticWalletRequest, Credentials, GenerateQrRequest, HttpMethod, PaymentInfoRequest,
    PaymentRefundRequest, PaymentStatus, RefundBlockedWalletRequest, ResendWebhookRequest,
    StaticWalletStatus, TestWebhookRequest, TokenKind,
};
use crate::{CryptomusError, Result};
use async_trait::async_trait;
use mockito::{Matcher, Server};
use serde_json::{json, Value};
use std::sync::Mutex;

const MERCHANT: &str = "8b03432e-385b-4670-8d06-064591096795";
const PAYMENT_SECRET: &str = "payment-secret";
const PAYOUT_SECRET: &str = "payout-secret";

fn credentials() -> Credentials {
    Credentials::new(MERCHANT, PAYMENT_SECRET, PAYOUT_SECRET)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn mock_client(server: &Server) -> CryptomusClient {
    init_tracing();
    CryptomusClient::with_config(credentials(), ClientConfig::new(server.url())).unwrap()
}

fn payment_json(order_id: &str) -> Value {
    json!({
        "uuid": "26109ba0-b05b-4ee0-93d1-fd62c822ce95",
        "order_id": order_id,
        "amount": "10.00",
        "payment_amount": null,
        "payer_amount": null,
        "discount_percent": null,
        "discount": "0.00000000",
        "payer_currency": null,
        "currency": "USDT",
        "merchant_amount": null,
        "network": null,
        "address": null,
        "from": null,
        "txid": null,
        "payment_status": "check",
        "url": "https://pay.cryptomus.com/pay/26109ba0-b05b-4ee0-93d1-fd62c822ce95",
        "expired_at": 1689098133,
        "status": "check",
        "is_final": false,
        "additional_data": null,
        "created_at": "2023-07-11T20:23:52+03:00",
        "updated_at": "2023-07-11T21:24:17+03:00"
    })
}

/// Records every request and answers with a fixed response
struct RecordingTransport {
    requests: Mutex<Vec<TransportRequest>>,
    response: TransportResponse,
}

impl RecordingTransport {
    fn new(status: u16, body: Value) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            response: TransportResponse {
                status,
                body: body.to_string(),
            },
        }
    }

    fn last_request(&self) -> TransportRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        self.requests.lock().unwrap().push(request);
        Ok(self.response.clone())
    }
}

/// Answers with the `Sign` header it received
struct EchoTransport;

#[async_trait]
impl Transport for EchoTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let sign = request.header("Sign").unwrap_or_default();
        Ok(TransportResponse {
            status: 200,
            body: json!({"state": 0, "result": {"sign": sign}}).to_string(),
        })
    }
}

/// Never reaches the gateway
struct UnreachableTransport;

#[async_trait]
impl Transport for UnreachableTransport {
    async fn send(&self, _request: TransportRequest) -> Result<TransportResponse> {
        Err(CryptomusError::transport("dns error: failed to lookup address"))
    }
}

#[test]
fn test_client_creation() {
    let client = CryptomusClient::new(credentials()).unwrap();
    assert_eq!(client.base_url(), "https://api.cryptomus.com/");
    assert_eq!(client.merchant_id(), MERCHANT);
}

#[test]
fn test_client_creation_normalizes_base_url() {
    let client =
        CryptomusClient::with_config(credentials(), ClientConfig::new("http://localhost:8080"))
            .unwrap();
    assert_eq!(client.base_url(), "http://localhost:8080/");
}

#[test]
fn test_client_rejects_missing_credentials() {
    let err = CryptomusClient::new(Credentials::new("", PAYMENT_SECRET, "")).unwrap_err();
    assert!(matches!(err, CryptomusError::Config(_)));

    let err = CryptomusClient::new(Credentials::new(MERCHANT, "", "")).unwrap_err();
    assert!(matches!(err, CryptomusError::Config(_)));
}

#[test]
fn test_client_rejects_invalid_base_url() {
    let err = CryptomusClient::with_config(credentials(), ClientConfig::new("ftp://example.com"))
        .unwrap_err();
    assert!(matches!(err, CryptomusError::Config(_)));
}

#[test]
fn test_client_debug_redacts_secrets() {
    let client = CryptomusClient::new(credentials()).unwrap();
    let debug = format!("{:?}", client);
    assert!(debug.contains(MERCHANT));
    assert!(!debug.contains(PAYMENT_SECRET));
    assert!(!debug.contains(PAYOUT_SECRET));
}

#[tokio::test]
async fn test_create_payment_success() {
    let mut server = Server::new_async().await;
    let request = CreatePaymentRequest::new("10", "USDT", "abc");

    let mock = server
        .mock("POST", "/v1/payment")
        .match_header("content-type", "application/json")
        .match_header("merchant", MERCHANT)
        .match_header("sign", "ba4b0e362517e39360d1011a11438b1b")
        .match_body(Matcher::Exact(
            r#"{"amount":"10","currency":"USDT","order_id":"abc"}"#.to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"state": 0, "result": payment_json("abc")}).to_string())
        .create_async()
        .await;

    let client = mock_client(&server);
    let response = client.create_payment(&request).await.unwrap();

    mock.assert_async().await;
    assert!(response.is_ok());
    assert_eq!(response.result.order_id, "abc");
    assert_eq!(response.result.amount, "10.00");
    assert_eq!(response.result.payment_status, PaymentStatus::Check);
    assert_eq!(response.result.expired_at.as_deref(), Some("1689098133"));
    assert_eq!(
        response.result.amount_as_decimal().unwrap().to_string(),
        "10.00"
    );
}

#[tokio::test]
async fn test_create_payment_signature_matches_independent_sign() {
    let order_id = uuid::Uuid::new_v4().to_string();
    let request = CreatePaymentRequest::new("10", "USDT", order_id.clone());
    let client =
        CryptomusClient::with_transport(credentials(), ClientConfig::default(), EchoTransport)
            .unwrap();

    let echoed: ApiResponse<Value> = client
        .call(endpoints::CREATE_PAYMENT, &request)
        .await
        .unwrap();

    let expected = signature::sign(
        &json!({"amount": "10", "currency": "USDT", "order_id": order_id}),
        PAYMENT_SECRET,
    )
    .unwrap();
    assert_eq!(echoed.result["sign"], expected);
}

#[tokio::test]
async fn test_create_payment_builds_signed_request() {
    let transport = RecordingTransport::new(200, json!({"state": 0, "result": payment_json("abc")}));
    let client = CryptomusClient::with_transport(credentials(), ClientConfig::default(), transport)
        .unwrap();

    let request = CreatePaymentRequest::new("10", "USDT", "abc")
        .with_url_callback("https://example.com/hook");
    client.create_payment(&request).await.unwrap();

    let sent = client.transport.last_request();
    let payload = sent.payload.clone().unwrap();
    assert_eq!(sent.method, HttpMethod::Post);
    assert_eq!(sent.url, "https://api.cryptomus.com/v1/payment");
    assert!(sent.query.is_empty());
    assert_eq!(
        payload,
        r#"{"amount":"10","currency":"USDT","order_id":"abc","url_callback":"https://example.com/hook"}"#
    );
    assert_eq!(sent.header("Content-Type"), Some("application/json"));
    assert_eq!(sent.header("Merchant"), Some(MERCHANT));
    assert_eq!(
        sent.header("Sign"),
        Some(signature::sign_json(&payload, PAYMENT_SECRET).as_str())
    );
}

#[tokio::test]
async fn test_gateway_error_propagation() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/payment")
        .with_status(422)
        .with_header("content-type", "application/json")
        .with_body(json!({"message": "bad request"}).to_string())
        .create_async()
        .await;

    let client = mock_client(&server);
    let err = client
        .create_payment(&CreatePaymentRequest::new("10", "USDT", "abc"))
        .await
        .unwrap_err();

    match &err {
        CryptomusError::Gateway { status, message } => {
            assert_eq!(*status, 422);
            assert!(message.contains("bad request"));
            assert_eq!(message, "{\n    \"message\": \"bad request\"\n}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_gateway_error_without_json_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/payment/info")
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let client = mock_client(&server);
    let err = client
        .payment_info(&PaymentInfoRequest::by_order_id("abc"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("Internal Server Error"));
}

#[tokio::test]
async fn test_transport_unavailable() {
    let client = CryptomusClient::with_transport(
        credentials(),
        ClientConfig::default(),
        UnreachableTransport,
    )
    .unwrap();

    let err = client
        .create_payment(&CreatePaymentRequest::new("10", "USDT", "abc"))
        .await
        .unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_payout_webhook_signed_with_payout_key() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/test-webhook/payout")
        .match_header("sign", "8fcbc3a85b6d043edc0f7e3933a38ba1")
        .match_body(Matcher::Exact(
            r#"{"url_callback":"https://example.com/hook","currency":"USDT","network":"tron","order_id":"abc","status":"paid"}"#
                .to_string(),
        ))
        .with_status(200)
        .with_body(json!({"state": 0, "result": []}).to_string())
        .create_async()
        .await;

    let client = mock_client(&server);
    let request =
        TestWebhookRequest::new("https://example.com/hook", "USDT", "tron", PaymentStatus::Paid)
            .with_order_id("abc");
    let response = client.test_payout_webhook(&request).await.unwrap();

    assert!(response.is_ok());
    assert!(response.result.is_empty());
}

#[tokio::test]
async fn test_payment_webhook_signed_with_payment_key() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/test-webhook/payment")
        .match_header("sign", "5bc7d81c94576d07b248d78f1f50ada3")
        .with_status(200)
        .with_body(json!({"state": 0, "result": []}).to_string())
        .create_async()
        .await;

    let client = mock_client(&server);
    let request =
        TestWebhookRequest::new("https://example.com/hook", "USDT", "tron", PaymentStatus::Paid)
            .with_order_id("abc");
    client.test_payment_webhook(&request).await.unwrap();
}

#[tokio::test]
async fn test_payout_endpoint_requires_payout_key() {
    let transport = RecordingTransport::new(200, json!({"state": 0, "result": []}));
    let client = CryptomusClient::with_transport(
        Credentials::new(MERCHANT, PAYMENT_SECRET, ""),
        ClientConfig::default(),
        transport,
    )
    .unwrap();

    let request =
        TestWebhookRequest::new("https://example.com/hook", "USDT", "tron", PaymentStatus::Paid);
    let err = client.test_payout_webhook(&request).await.unwrap_err();

    assert!(matches!(err, CryptomusError::Config(_)));
    assert!(client.transport.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_get_request_uses_query_parameters() {
    let transport = RecordingTransport::new(200, json!({"state": 0, "result": []}));
    let client = CryptomusClient::with_transport(credentials(), ClientConfig::default(), transport)
        .unwrap();

    let body = json!({"order_id": "abc", "limit": 10, "is_final": true, "cursor": null});
    let _: ApiResponse<Value> = client
        .request(HttpMethod::Get, TokenKind::Payment, "v1/payment/list", &body)
        .await
        .unwrap();

    let sent = client.transport.last_request();
    assert_eq!(sent.method, HttpMethod::Get);
    assert_eq!(sent.payload, None);
    assert_eq!(
        sent.query,
        vec![
            ("order_id".to_string(), "abc".to_string()),
            ("limit".to_string(), "10".to_string()),
            ("is_final".to_string(), "true".to_string()),
        ]
    );
    assert_eq!(
        sent.header("Sign"),
        Some(signature::sign_value(&body, PAYMENT_SECRET).as_str())
    );
}

#[tokio::test]
async fn test_get_request_rejects_non_object_body() {
    let transport = RecordingTransport::new(200, json!({"state": 0, "result": []}));
    let client = CryptomusClient::with_transport(credentials(), ClientConfig::default(), transport)
        .unwrap();

    let result: Result<ApiResponse<Value>> = client
        .request(HttpMethod::Get, TokenKind::Payment, "v1/payment/list", &json!(["a"]))
        .await;

    assert!(matches!(result, Err(CryptomusError::Config(_))));
    assert!(client.transport.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_static_wallet() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/wallet")
        .match_body(Matcher::Exact(
            r#"{"currency":"USDT","order_id":"wallet-1","network":"tron"}"#.to_string(),
        ))
        .with_status(200)
        .with_body(
            json!({
                "state": 0,
                "result": {
                    "wallet_uuid": "4d2a1b3c-0000-4000-8000-000000000001",
                    "uuid": "4d2a1b3c-0000-4000-8000-000000000002",
                    "address": "TDD97yguPESTpcrJMqU6h2ozZbibv4Vaqm",
                    "network": "tron",
                    "currency": "USDT",
                    "url": "https://pay.cryptomus.com/wallet/4d2a1b3c"
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = mock_client(&server);
    let response = client
        .create_static_wallet(&CreateStaticWalletRequest::new("USDT", "wallet-1", "tron"))
        .await
        .unwrap();

    assert_eq!(response.result.address, "TDD97yguPESTpcrJMqU6h2ozZbibv4Vaqm");
    assert_eq!(response.result.network, "tron");
}

#[tokio::test]
async fn test_generate_qr() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/wallet/qr")
        .with_status(200)
        .with_body(json!({"state": 0, "result": {"image": "data:image/png;base64,iVBORw0KGgo="}}).to_string())
        .create_async()
        .await;

    let client = mock_client(&server);
    let response = client
        .generate_qr(&GenerateQrRequest::new("4d2a1b3c-0000-4000-8000-000000000002"))
        .await
        .unwrap();

    assert!(response.result.image.starts_with("data:image/png;base64,"));
}

#[tokio::test]
async fn test_block_static_wallet() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/wallet/block-address")
        .match_body(Matcher::Exact(
            r#"{"order_id":"wallet-1","is_force_refund":true}"#.to_string(),
        ))
        .with_status(200)
        .with_body(
            json!({"state": 0, "result": {"uuid": "4d2a1b3c-0000-4000-8000-000000000002", "status": "blocked"}})
                .to_string(),
        )
        .create_async()
        .await;

    let client = mock_client(&server);
    let request = BlockStaticWalletRequest {
        order_id: Some("wallet-1".to_string()),
        is_force_refund: Some(true),
        ..Default::default()
    };
    let response = client.block_static_wallet(&request).await.unwrap();

    assert_eq!(response.result.status, StaticWalletStatus::Blocked);
}

#[tokio::test]
async fn test_refund_blocked_wallet() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/wallet/blocked-address-refund")
        .with_status(200)
        .with_body(json!({"state": 0, "result": {"commission": "0.40", "amount": "9.60"}}).to_string())
        .create_async()
        .await;

    let client = mock_client(&server);
    let request = RefundBlockedWalletRequest {
        uuid: None,
        order_id: Some("wallet-1".to_string()),
        address: "TDD97yguPESTpcrJMqU6h2ozZbibv4Vaqm".to_string(),
    };
    let response = client.refund_blocked_wallet(&request).await.unwrap();

    assert_eq!(response.result.amount_as_decimal().unwrap().to_string(), "9.60");
    assert_eq!(
        response.result.commission_as_decimal().unwrap().to_string(),
        "0.40"
    );
}

#[tokio::test]
async fn test_payment_info() {
    let mut server = Server::new_async().await;
    let mut paid = payment_json("abc");
    paid["payment_status"] = json!("paid");
    paid["payment_amount"] = json!("10.00");
    paid["is_final"] = json!(true);

    let _mock = server
        .mock("POST", "/v1/payment/info")
        .match_body(Matcher::Exact(r#"{"order_id":"abc"}"#.to_string()))
        .with_status(200)
        .with_body(json!({"state": 0, "result": paid}).to_string())
        .create_async()
        .await;

    let client = mock_client(&server);
    let response = client
        .payment_info(&PaymentInfoRequest::by_order_id("abc"))
        .await
        .unwrap();

    assert!(response.result.payment_status.is_success());
    assert!(response.result.is_final);
    assert_eq!(
        response
            .result
            .payment_amount_as_decimal()
            .unwrap()
            .map(|d| d.to_string()),
        Some("10.00".to_string())
    );
}

#[tokio::test]
async fn test_refund_payment_and_resend_webhook() {
    let mut server = Server::new_async().await;
    let refund = server
        .mock("POST", "/v1/payment/refund")
        .match_body(Matcher::Exact(
            r#"{"address":"TDD97yguPESTpcrJMqU6h2ozZbibv4Vaqm","is_subtract":true,"order_id":"abc"}"#
                .to_string(),
        ))
        .with_status(200)
        .with_body(json!({"state": 0, "result": []}).to_string())
        .create_async()
        .await;
    let resend = server
        .mock("POST", "/v1/payment/resend")
        .match_body(Matcher::Exact(r#"{"uuid":"26109ba0"}"#.to_string()))
        .with_status(200)
        .with_body(json!({"state": 0, "result": []}).to_string())
        .create_async()
        .await;

    let client = mock_client(&server);
    client
        .refund_payment(&PaymentRefundRequest {
            address: "TDD97yguPESTpcrJMqU6h2ozZbibv4Vaqm".to_string(),
            is_subtract: true,
            uuid: None,
            order_id: Some("abc".to_string()),
        })
        .await
        .unwrap();
    client
        .resend_webhook(&ResendWebhookRequest {
            uuid: Some("26109ba0".to_string()),
            order_id: None,
        })
        .await
        .unwrap();

    refund.assert_async().await;
    resend.assert_async().await;
}

#[tokio::test]
async fn test_invalid_success_body_is_json_error() {
    let transport = RecordingTransport::new(200, json!("not an envelope"));
    let client = CryptomusClient::with_transport(credentials(), ClientConfig::default(), transport)
        .unwrap();

    let err = client
        .create_payment(&CreatePaymentRequest::new("10", "USDT", "abc"))
        .await
        .unwrap_err();
    assert!(matches!(err, CryptomusError::Json(_)));
}

#[test]
fn test_verify_signature_and_parse_webhook() {
    let client = CryptomusClient::new(credentials()).unwrap();

    let mut body = json!({
        "type": "payment",
        "uuid": "62f88b36-a9d5-4fa6-aa26-e040c3dbf26d",
        "order_id": "97a75bf8eda5cca41ba9d2e104840fcd",
        "amount": "3.00000000",
        "url_callback": "https://example.com/hook",
        "status": "paid"
    });
    body["sign"] = json!("bc66688fefd5b42128a270137ffd97bd");

    assert!(client.verify_signature(&body));

    let payload = client.parse_webhook(&body.to_string()).unwrap();
    assert_eq!(payload.kind.as_deref(), Some("payment"));
    assert_eq!(payload.status, PaymentStatus::Paid);
    assert_eq!(payload.amount.as_deref(), Some("3.00000000"));
    assert_eq!(payload.extra["url_callback"], "https://example.com/hook");
}

#[test]
fn test_verify_signature_uses_payment_key_only() {
    let client = CryptomusClient::new(credentials()).unwrap();
    let body = json!({"order_id": "abc", "status": "paid"});
    let mut signed = body.clone();
    signed["sign"] = json!(signature::sign_value(&body, PAYOUT_SECRET));

    assert!(!client.verify_signature(&signed));
}
