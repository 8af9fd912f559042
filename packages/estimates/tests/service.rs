//! HTTP-boundary tests for the estimates service

use std::path::PathBuf;
use std::sync::Arc;

use bayline_auth::TokenStore;
use bayline_client::{ApiClient, ClientConfig};
use bayline_estimates::{EstimateItemDraft, EstimateStatus, EstimatesService};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(server: &MockServer) -> EstimatesService {
    let tokens = Arc::new(TokenStore::with_path(PathBuf::from(
        "/nonexistent/auth.toml",
    )));
    let client = ApiClient::new(ClientConfig::new(server.uri()), tokens).unwrap();
    EstimatesService::new(client)
}

#[tokio::test]
async fn create_sends_derived_costs_and_omits_blank_part_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/estimates"))
        .and(body_partial_json(serde_json::json!({
            "vehicle_id": "veh-1",
            "items": [
                {"description": "Brake service", "cost": 180.0},
                {"description": "Brake pads", "cost": 90.0, "part_id": "BRK-100", "qty": 2}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "est-1",
            "vehicleId": "veh-1",
            "customerId": "cust-1",
            "status": "DRAFT",
            "total": 270.0,
            "items": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let items = vec![
        EstimateItemDraft::Labor {
            description: "Brake service".to_string(),
            hours: 1.5,
            rate: 120.0,
        },
        EstimateItemDraft::Part {
            description: "Brake pads".to_string(),
            unit_price: 45.0,
            quantity: 2.0,
            part_number: Some(" BRK-100 ".to_string()),
        },
    ];

    let estimate = service_for(&server).create("veh-1", &items).await.unwrap();
    assert_eq!(estimate.id, "est-1");
    assert_eq!(estimate.status, EstimateStatus::Draft);
    assert_eq!(estimate.total, 270.0);
}

#[tokio::test]
async fn update_status_puts_status_query_param() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/estimates/est-9/status"))
        .and(query_param("status", "APPROVED"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Estimate approved",
            "estimate": {"id": "est-9", "status": "APPROVED", "total": 0.0}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = service_for(&server)
        .update_status("est-9", "APPROVED")
        .await
        .unwrap();
    assert_eq!(response.estimate.status, EstimateStatus::Approved);
}

#[tokio::test]
async fn convert_rejected_estimate_surfaces_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/estimates/est-2/convert"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "detail": "Estimate not approved or not found"
        })))
        .mount(&server)
        .await;

    let err = service_for(&server).convert("est-2").await.unwrap_err();
    assert_eq!(err.status, Some(400));
    assert_eq!(err.message, "Estimate not approved or not found");
}
