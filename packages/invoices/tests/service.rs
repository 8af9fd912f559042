//! HTTP-boundary tests for the invoices service

use std::path::PathBuf;
use std::sync::Arc;

use bayline_auth::TokenStore;
use bayline_client::{ApiClient, ClientConfig};
use bayline_invoices::{invoice_balance, InvoiceStatus, InvoicesService};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(server: &MockServer) -> InvoicesService {
    let tokens = Arc::new(TokenStore::with_path(PathBuf::from(
        "/nonexistent/auth.toml",
    )));
    let client = ApiClient::new(ClientConfig::new(server.uri()), tokens).unwrap();
    InvoicesService::new(client)
}

#[tokio::test]
async fn pay_posts_amount_and_method() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/invoice/inv-1/pay"))
        .and(body_partial_json(serde_json::json!({
            "amount": 120.0,
            "method": "card"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "inv-1",
            "status": "PARTIALLY_PAID",
            "subtotal": 200.0,
            "tax": 16.0,
            "payments": [
                {"id": "pay-1", "amount": 120.0, "method": "card", "receivedAt": "2024-05-01T10:00:00Z"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let invoice = service_for(&server).pay("inv-1", 120.0, "card").await.unwrap();
    assert_eq!(invoice.status, InvoiceStatus::PartiallyPaid);
    // 216 derived total - 120 paid
    assert_eq!(invoice_balance(&invoice), 96.0);
}

#[tokio::test]
async fn margin_analytics_deserializes_series() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/invoice/analytics/margin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "averageMarginPercent": 35.5,
            "lowMarginInvoices": 1,
            "threshold": 25.0,
            "series": [
                {"invoiceId": "inv-1", "number": "1001", "grossMarginPercent": 12.0, "isBelowThreshold": true}
            ]
        })))
        .mount(&server)
        .await;

    let analytics = service_for(&server).margin_analytics().await.unwrap();
    assert_eq!(analytics.low_margin_invoices, 1);
    assert_eq!(analytics.series[0].invoice_id, "inv-1");
    assert!(analytics.series[0].is_below_threshold);
}

#[tokio::test]
async fn pdf_returns_raw_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/invoice/inv-1/pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/pdf")
                .set_body_bytes(b"%PDF-1.4 fake".to_vec()),
        )
        .mount(&server)
        .await;

    let bytes = service_for(&server).pdf("inv-1").await.unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}
