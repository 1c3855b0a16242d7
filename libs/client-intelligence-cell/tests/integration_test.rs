// libs/client-intelligence-cell/tests/integration_test.rs
use chrono::{Duration, Utc};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use client_intelligence_cell::models::{ClientIdentity, IntelligenceError, TagKind};
use client_intelligence_cell::services::ClientIntelligenceService;
use shared_utils::test_utils::TestConfig;

struct TestSetup {
    service: ClientIntelligenceService,
    mock_server: MockServer,
    auth_token: String,
}

impl TestSetup {
    async fn new() -> Self {
        let mock_server = MockServer::start().await;
        let config = TestConfig::with_datastore_url(&mock_server.uri()).to_app_config();

        Self {
            service: ClientIntelligenceService::new(&config),
            mock_server,
            auth_token: "test_token".to_string(),
        }
    }
}

#[tokio::test]
async fn test_intelligence_over_fetched_records() {
    let setup = TestSetup::new().await;
    let seventy_days_ago = (Utc::now() - Duration::days(70)).to_rfc3339();

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("client_name", "eq.Ana Soto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![json!({
            "business_id": "biz-1",
            "client_name": "Ana Soto",
            "client_phone": "+56911111111",
            "date": seventy_days_ago,
            "service_name": "Corte",
            "service_price": 15000,
            "status": "completed",
            "staff_name": "Camila"
        })]))
        .mount(&setup.mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/invoices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<serde_json::Value>::new()))
        .mount(&setup.mock_server)
        .await;

    let view = setup
        .service
        .get_client_intelligence(
            ClientIdentity::new("Ana Soto", "+56911111111"),
            "biz-1",
            &setup.auth_token,
        )
        .await
        .unwrap();

    assert_eq!(view.metrics.frequency_total, 1);
    assert_eq!(view.metrics.recency_days, Some(70));
    assert!(view.tags.iter().any(|t| t.kind == TagKind::Lost));
}

#[tokio::test]
async fn test_malformed_rows_degrade_instead_of_failing() {
    let setup = TestSetup::new().await;

    // Rows written by the public booking form: string price, bare date,
    // missing fields. None of it may fail the computation.
    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![
            json!({"client_name": "Ana Soto", "client_phone": "+56911111111", "date": "not-a-date"}),
            json!({"client_name": "Ana Soto", "client_phone": "+56911111111"}),
        ]))
        .mount(&setup.mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/invoices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![
            json!({"client_name": "Ana Soto", "client_phone": "+56911111111", "total_amount": "abc", "status": "paid"}),
        ]))
        .mount(&setup.mock_server)
        .await;

    let view = setup
        .service
        .get_client_intelligence(
            ClientIdentity::new("Ana Soto", "+56911111111"),
            "biz-1",
            &setup.auth_token,
        )
        .await
        .unwrap();

    assert_eq!(view.metrics.frequency_total, 2);
    assert_eq!(view.metrics.recency_days, None);
    assert_eq!(view.metrics.monetary_total, 0.0);
    assert!(view.tags.is_empty());
}

#[tokio::test]
async fn test_blank_identity_is_rejected_before_any_fetch() {
    let setup = TestSetup::new().await;

    let result = setup
        .service
        .get_client_intelligence(ClientIdentity::new("  ", ""), "biz-1", &setup.auth_token)
        .await;

    assert!(matches!(result, Err(IntelligenceError::MissingIdentity)));
}

#[tokio::test]
async fn test_datastore_failure_surfaces_as_error() {
    let setup = TestSetup::new().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&setup.mock_server)
        .await;

    let result = setup
        .service
        .get_client_intelligence(
            ClientIdentity::new("Ana Soto", "+56911111111"),
            "biz-1",
            &setup.auth_token,
        )
        .await;

    assert!(matches!(result, Err(IntelligenceError::DatastoreError(_))));
}
