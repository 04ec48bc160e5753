//! End-to-end tests for a session against a mock Content API.
//!
//! These tests verify the bootstrap from an injected credential and endpoint,
//! the product insert/list/get/delete round trip, the request log and the
//! demo runner's handling of account types.

use std::sync::Arc;

use serde_json::json;
use shopping_samples::auth::Credential;
use shopping_samples::samples::{create_example_product, run_all, Demo};
use shopping_samples::{ContentSession, Endpoint, RequestLog, SamplesConfig, SamplesError};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MERCHANT_ID: u64 = 12345;
const PRODUCT_ID: &str = "online:en:US:book123";

fn product_json() -> serde_json::Value {
    json!({
        "kind": "content#product",
        "id": PRODUCT_ID,
        "offerId": "book123",
        "title": "A Tale of Two Cities",
        "contentLanguage": "en",
        "targetCountry": "US",
        "channel": "online",
        "availability": "in stock",
        "price": {"value": "2.50", "currency": "USD"}
    })
}

/// Mounts `authinfo` and the account record for a standalone account.
async fn mount_account(server: &MockServer, aggregator: bool) {
    let identifier = if aggregator {
        json!({"aggregatorId": MERCHANT_ID.to_string()})
    } else {
        json!({"merchantId": MERCHANT_ID.to_string()})
    };
    Mock::given(method("GET"))
        .and(path("/content/v2.1/accounts/authinfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "content#accountsAuthInfoResponse",
            "accountIdentifiers": [identifier]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/content/v2.1/{MERCHANT_ID}/accounts/{MERCHANT_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "content#account",
            "id": MERCHANT_ID.to_string(),
            "name": "Sample Store",
            "websiteUrl": "https://store.example.com/"
        })))
        .mount(server)
        .await;
}

/// Mounts the product endpoints. The first list call sees the inserted
/// product, later ones see an empty catalog.
async fn mount_products(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(format!("/content/v2.1/{MERCHANT_ID}/products")))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json()))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/content/v2.1/{MERCHANT_ID}/products")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "content#productsListResponse",
            "resources": [product_json()]
        })))
        .up_to_n_times(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/content/v2.1/{MERCHANT_ID}/products")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "content#productsListResponse"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(format!(
            r"^/content/v2\.1/{MERCHANT_ID}/products/online.+book123$"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json()))
        .mount(server)
        .await;

    Mock::given(method("DELETE"))
        .and(path_regex(format!(
            r"^/content/v2\.1/{MERCHANT_ID}/products/online.+book123$"
        )))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(server)
        .await;
}

async fn connect(
    server: &MockServer,
    request_log: Option<Arc<RequestLog>>,
) -> Result<ContentSession, SamplesError> {
    let config = SamplesConfig::from_json(r#"{"merchantId": "12345", "isMCA": false}"#)?;
    let endpoint = Endpoint::resolve(Some(&format!("{}/content/v2.1", server.uri())))?;
    ContentSession::connect(
        config,
        &endpoint,
        Arc::new(Credential::from_token("test-token")),
        request_log,
    )
    .await
}

fn titles(page: &[shopping_samples::content::Product], into: &mut Vec<String>) {
    into.extend(page.iter().filter_map(|p| p.title.clone()));
}

// ============================================================================
// Session bootstrap
// ============================================================================

#[tokio::test]
async fn test_connect_loads_account_context() {
    let server = MockServer::start().await;
    mount_account(&server, false).await;

    let session = connect(&server, None).await.unwrap();

    assert_eq!(session.merchant_id(), MERCHANT_ID);
    assert!(!session.context().is_mca);
    assert_eq!(
        session.context().website_url.as_deref(),
        Some("https://store.example.com/")
    );
}

#[tokio::test]
async fn test_connect_without_account_access_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/content/v2.1/accounts/authinfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "content#accountsAuthInfoResponse"
        })))
        .mount(&server)
        .await;

    let result = connect(&server, None).await;

    assert!(matches!(result, Err(SamplesError::NoAccountAccess)));
}

// ============================================================================
// Product round trip
// ============================================================================

#[tokio::test]
async fn test_product_insert_list_delete_round_trip() {
    let server = MockServer::start().await;
    mount_account(&server, false).await;
    mount_products(&server).await;

    let session = connect(&server, None).await.unwrap();
    let products = session.content().products();
    let merchant_id = session.merchant_id();

    let product = create_example_product(
        session.context().website_url.as_deref(),
        "book123",
    );
    let inserted = products.insert(merchant_id, &product).await.unwrap();
    assert_eq!(inserted.id.as_deref(), Some(PRODUCT_ID));

    let mut seen = Vec::new();
    let count = products
        .list_all(merchant_id, None, |page| titles(page, &mut seen))
        .await
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(seen, vec!["A Tale of Two Cities"]);

    products.delete(merchant_id, PRODUCT_ID).await.unwrap();

    let mut seen = Vec::new();
    let count = products
        .list_all(merchant_id, None, |page| titles(page, &mut seen))
        .await
        .unwrap();
    assert_eq!(count, 0);
    assert!(seen.is_empty());
}

#[tokio::test]
async fn test_products_demo_runs_and_logs_requests() {
    let server = MockServer::start().await;
    mount_account(&server, false).await;
    mount_products(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("requests.json");
    let log = Arc::new(RequestLog::create(&log_path).unwrap());

    let session = connect(&server, Some(log)).await.unwrap();
    let failures = run_all(&session, &[Demo::Products]).await;
    assert_eq!(failures, 0);

    let logged = std::fs::read_to_string(&log_path).unwrap();
    assert!(logged.contains("\"method\": \"POST\""));
    assert!(logged.contains("\"statusCode\": 204"));
    assert!(logged.contains("A Tale of Two Cities"));
}

#[tokio::test]
async fn test_products_demo_is_skipped_on_multi_client_account() {
    let server = MockServer::start().await;
    mount_account(&server, true).await;

    let session = connect(&server, None).await.unwrap();
    assert!(session.context().is_mca);

    // Skipped demos are not failures and make no product calls.
    let failures = run_all(&session, &[Demo::Products, Demo::Inventory]).await;
    assert_eq!(failures, 0);
    assert!(matches!(
        Demo::Products.run(&session).await,
        Err(SamplesError::WrongAccountType(_))
    ));
}

#[tokio::test]
async fn test_failed_demo_is_counted() {
    let server = MockServer::start().await;
    mount_account(&server, false).await;
    Mock::given(method("POST"))
        .and(path(format!("/content/v2.1/{MERCHANT_ID}/products")))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 400,
                "message": "[price] required",
                "errors": [{"reason": "required", "message": "[price] required"}]
            }
        })))
        .mount(&server)
        .await;

    let session = connect(&server, None).await.unwrap();
    let failures = run_all(&session, &[Demo::Products]).await;

    assert_eq!(failures, 1);
}
