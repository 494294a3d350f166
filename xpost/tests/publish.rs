//! Publish contract tests against a mock X API server.
//!
//! Verifies request shape (endpoint, OAuth header, JSON body), response
//! parsing, and error surfacing for non-2xx statuses.

use serde_json::json;
use wiremock::matchers::{body_json, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use xpost::{Credentials, Error, XClient};

fn test_client(base_url: &str) -> XClient {
    XClient::new(Credentials {
        api_key: "test-key".to_string(),
        api_secret: "test-secret".to_string(),
        access_token: "test-token".to_string(),
        access_token_secret: "test-token-secret".to_string(),
    })
    .with_base_url(base_url.to_string())
}

#[tokio::test]
async fn test_post_sends_signed_json_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .and(header_exists("authorization"))
        .and(body_json(json!({"text": "Hola mundo"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {"id": "1849000000000000001", "text": "Hola mundo"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let receipt = client.post("Hola mundo").await.expect("post should succeed");

    assert_eq!(receipt.id, "1849000000000000001");
    assert_eq!(receipt.text, "Hola mundo");
}

#[tokio::test]
async fn test_authorization_header_is_oauth1() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {"id": "1", "text": "x"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    client.post("x").await.expect("post should succeed");

    let requests = mock_server
        .received_requests()
        .await
        .expect("requests recorded");
    let auth = requests[0]
        .headers
        .get("authorization")
        .expect("authorization header present")
        .to_str()
        .expect("header is ascii");

    assert!(auth.starts_with("OAuth "));
    assert!(auth.contains("oauth_consumer_key=\"test-key\""));
    assert!(auth.contains("oauth_signature_method=\"HMAC-SHA1\""));
    assert!(auth.contains("oauth_token=\"test-token\""));
    assert!(auth.contains("oauth_signature=\""));
}

#[tokio::test]
async fn test_api_error_surfaces_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "title": "Forbidden",
            "detail": "You are not permitted to perform this action."
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let err = client.post("rejected").await.unwrap_err();

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 403);
            assert!(message.contains("Forbidden"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_response_is_a_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .respond_with(ResponseTemplate::new(201).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let err = client.post("x").await.unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[tokio::test]
async fn test_network_error_when_server_unreachable() {
    // Port 9 (discard) is never serving HTTP
    let client = test_client("http://127.0.0.1:9");
    let err = client.post("x").await.unwrap_err();
    assert!(matches!(err, Error::Network(_)));
}
