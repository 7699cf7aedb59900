//! HttpVerdictSource against a wiremock server.
//!
//! The source uses a blocking reqwest client, so each check runs inside
//! `spawn_blocking` while the mock server lives on the test runtime.

use gracekeeper::client::http::HttpVerdictSource;
use gracekeeper::protocol::models::ValidationRequest;
use gracekeeper::{GracekeeperConfig, GracekeeperError, VerdictSource};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_request() -> ValidationRequest {
    ValidationRequest {
        license_key: "key-1".to_string(),
        product_name: "widget".to_string(),
        metadata: None,
    }
}

async fn check(config: GracekeeperConfig) -> Result<gracekeeper::Verdict, GracekeeperError> {
    tokio::task::spawn_blocking(move || {
        let source = HttpVerdictSource::new(&config)?;
        source.check(&test_request())
    })
    .await
    .expect("blocking task panicked")
}

#[tokio::test]
async fn decodes_verdict_on_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/licenses/validate"))
        .and(header("Authorization", "Bearer key-1"))
        .and(header("Content-Type", "application/json"))
        .and(body_partial_json(serde_json::json!({
            "license_key": "key-1",
            "product_name": "widget"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "is_valid": true,
            "status": "active",
            "expires_at": "2027-06-30T00:00:00Z",
            "allowed_data": {"features": ["export"]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = GracekeeperConfig::new(server.uri(), "key-1", "widget");
    let verdict = check(config).await.unwrap();

    assert!(verdict.is_valid);
    assert_eq!(verdict.status.as_deref(), Some("active"));
    assert_eq!(verdict.expires_at.as_deref(), Some("2027-06-30T00:00:00Z"));
}

#[tokio::test]
async fn non_2xx_is_a_network_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/licenses/validate"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = GracekeeperConfig::new(server.uri(), "key-1", "widget");
    let err = check(config).await.unwrap_err();

    assert!(err.is_network());
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn undecodable_body_is_a_network_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/licenses/validate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let config = GracekeeperConfig::new(server.uri(), "key-1", "widget");
    let err = check(config).await.unwrap_err();

    assert!(err.is_network());
}

#[tokio::test]
async fn timeout_is_a_network_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/licenses/validate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"is_valid": true}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let mut config = GracekeeperConfig::new(server.uri(), "key-1", "widget");
    config.request_timeout = Duration::from_millis(50);
    let err = check(config).await.unwrap_err();

    assert!(err.is_network());
}
