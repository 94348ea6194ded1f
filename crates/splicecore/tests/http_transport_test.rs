//! HTTP adapter tests against a local wiremock server: header handling
//! and the mapping of each failure mode onto the transport taxonomy.

use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use splicecore::api::{Endpoint, FileCategory, FileQuery, IdentityRequest};
use splicecore::client::ApiClient;
use splicecore::config::{ApiMode, SessionConfig};
use splicecore::error::TransportError;
use splicecore::transport::{HttpTransport, Transport};

fn config_for(server: &MockServer) -> SessionConfig {
    SessionConfig {
        base_url: server.uri(),
        api_mode: ApiMode::Server,
        timeout: Duration::from_millis(500),
        init_data: "test-init-data".to_string(),
        ..SessionConfig::default()
    }
}

fn client_for(server: &MockServer) -> ApiClient {
    let transport = HttpTransport::new(&config_for(server)).unwrap();
    ApiClient::new(std::sync::Arc::new(transport))
}

#[tokio::test]
async fn get_endpoint_parses_typed_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/files/counts"))
        .and(header("X-Telegram-Init-Data", "test-init-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "free_count": 8,
            "premium_count": 10
        })))
        .expect(1)
        .mount(&server)
        .await;

    let counts = client_for(&server).file_counts().await.unwrap();
    assert_eq!(counts.free_count, 8);
    assert_eq!(counts.total(), 18);
}

#[tokio::test]
async fn post_endpoint_sends_json_body() {
    let server = MockServer::start().await;
    let query = FileQuery {
        page: 2,
        search: "drum".to_string(),
        user_id: Some(42),
    };
    Mock::given(method("POST"))
        .and(path("/api/files/free"))
        .and(body_json(&query))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "files": [],
            "pagination": {
                "current_page": 2,
                "total_pages": 2,
                "total_files": 8,
                "files_per_page": 6,
                "has_next": false,
                "has_prev": true
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server).files(FileCategory::Free, &query).await.unwrap();
    assert!(page.pagination.has_prev);
}

#[tokio::test]
async fn non_success_status_maps_to_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/user/status"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .user_status(&IdentityRequest::default())
        .await
        .unwrap_err();
    match err {
        TransportError::Http(status) => assert_eq!(status.as_u16(), 502),
        other => panic!("expected Http(502), got {other:?}"),
    }
}

#[tokio::test]
async fn junk_body_maps_to_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/files/counts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let err = client_for(&server).file_counts().await.unwrap_err();
    assert!(matches!(err, TransportError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn wrong_schema_maps_to_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/files/counts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": "ok" })))
        .mount(&server)
        .await;

    let err = client_for(&server).file_counts().await.unwrap_err();
    assert!(matches!(err, TransportError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn slow_server_maps_to_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&config_for(&server)).unwrap();
    let err = transport.call(&Endpoint::Stats, None).await.unwrap_err();
    assert!(matches!(err, TransportError::Timeout), "got {err:?}");
}
