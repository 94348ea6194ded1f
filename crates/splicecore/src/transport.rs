//! Raw transport layer: one API call in, one parsed JSON value out.
//!
//! The bootstrap sequencer and the typed client only ever see the
//! [`Transport`] trait, so the real HTTP backend and the deterministic
//! mock are interchangeable — and tests can script failures precisely.

use async_trait::async_trait;
use serde_json::Value;

use crate::api::{Endpoint, FileQuery, IdentityRequest};
use crate::catalog;
use crate::config::SessionConfig;
use crate::error::{TransportError, TransportResult};

/// A single network (or mock) call. No retries, no shared-state mutation;
/// resilience lives one level up, in the bootstrap sequencer.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn call(&self, endpoint: &Endpoint, body: Option<Value>) -> TransportResult<Value>;
}

// ============================================================================
// HTTP TRANSPORT
// ============================================================================

/// Real backend transport over reqwest.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    init_data: String,
}

impl HttpTransport {
    /// Builds a transport with the configured per-request timeout.
    pub fn new(config: &SessionConfig) -> TransportResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(TransportError::from)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            init_data: config.init_data.clone(),
        })
    }

    fn url_for(&self, endpoint: &Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(&self, endpoint: &Endpoint, body: Option<Value>) -> TransportResult<Value> {
        let mut request = self
            .client
            .request(endpoint.method(), self.url_for(endpoint))
            .header("X-Telegram-Init-Data", self.init_data.as_str());

        if let Some(body) = body {
            // Sets Content-Type: application/json as well
            request = request.json(&body);
        }

        let response = request.send().await.map_err(TransportError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Http(status));
        }

        let value = response.json::<Value>().await.map_err(TransportError::from)?;
        Ok(value)
    }
}

// ============================================================================
// MOCK TRANSPORT
// ============================================================================

/// Deterministic transport backed by the built-in catalog.
///
/// Never touches the network and never fails, with one exception:
/// downloads travel over the Telegram bridge in mock mode, so
/// `Download(_)` answers `UnsupportedEndpoint`.
#[derive(Debug, Default, Clone)]
pub struct MockTransport;

impl MockTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn call(&self, endpoint: &Endpoint, body: Option<Value>) -> TransportResult<Value> {
        match endpoint {
            Endpoint::UserStatus => {
                let identity: IdentityRequest = match body {
                    Some(value) => serde_json::from_value(value)?,
                    None => IdentityRequest::default(),
                };
                Ok(serde_json::to_value(catalog::fallback_user_status(&identity))?)
            }
            Endpoint::FileCounts => Ok(serde_json::to_value(catalog::counts())?),
            Endpoint::Files(category) => {
                let query: FileQuery = match body {
                    Some(value) => serde_json::from_value(value)?,
                    None => FileQuery::default(),
                };
                Ok(serde_json::to_value(catalog::query(*category, query.page, &query.search))?)
            }
            Endpoint::Stats => Ok(serde_json::json!({
                "status": "ok",
                "timestamp": chrono::Utc::now().timestamp_millis(),
            })),
            Endpoint::Download(_) => Err(TransportError::UnsupportedEndpoint(endpoint.path())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::UserStatus;

    #[tokio::test]
    async fn mock_serves_user_status_for_anonymous_callers() {
        let transport = MockTransport::new();
        let value = transport.call(&Endpoint::UserStatus, None).await.unwrap();
        let status: UserStatus = serde_json::from_value(value).unwrap();
        assert_eq!(status.username, "testuser");
    }

    #[tokio::test]
    async fn mock_serves_file_pages_from_query_body() {
        let transport = MockTransport::new();
        let body = serde_json::json!({ "page": 2, "search": "", "user_id": null });
        let value = transport
            .call(&Endpoint::Files(crate::api::FileCategory::Free), Some(body))
            .await
            .unwrap();
        assert_eq!(value["pagination"]["current_page"], 2);
        assert_eq!(value["files"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn mock_rejects_downloads() {
        let transport = MockTransport::new();
        let err = transport.call(&Endpoint::Download(3), None).await.unwrap_err();
        assert!(matches!(err, TransportError::UnsupportedEndpoint(_)));
    }

    #[tokio::test]
    async fn mock_stats_probe_is_ok() {
        let transport = MockTransport::new();
        let value = transport.call(&Endpoint::Stats, None).await.unwrap();
        assert_eq!(value["status"], "ok");
    }
}
