//! Typed API layer over the raw transport.
//!
//! Each operation pairs an endpoint with its request and response schema
//! and validates the response at this boundary; a shape mismatch is a
//! `TransportError::Parse`, never a silently-missing field downstream.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::api::{
    DownloadAck, DownloadRequest, Endpoint, FileCategory, FileCounts, FilePage, FileQuery, IdentityRequest,
    UserStatus,
};
use crate::error::TransportResult;
use crate::transport::Transport;

/// Typed client for the storefront API. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    async fn call_typed<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        body: Option<Value>,
    ) -> TransportResult<T> {
        let value = self.transport.call(endpoint, body).await?;
        let parsed = serde_json::from_value(value)?;
        Ok(parsed)
    }

    /// Resolves the caller's account status and premium quota.
    pub async fn user_status(&self, identity: &IdentityRequest) -> TransportResult<UserStatus> {
        let body = serde_json::to_value(identity)?;
        self.call_typed(&Endpoint::UserStatus, Some(body)).await
    }

    /// Fetches per-tier catalog sizes for the home screen.
    pub async fn file_counts(&self) -> TransportResult<FileCounts> {
        self.call_typed(&Endpoint::FileCounts, None).await
    }

    /// Fetches one page of a tier's catalog.
    pub async fn files(&self, category: FileCategory, query: &FileQuery) -> TransportResult<FilePage> {
        let body = serde_json::to_value(query)?;
        self.call_typed(&Endpoint::Files(category), Some(body)).await
    }

    /// Liveness probe used by the connectivity monitor. Only the transport
    /// outcome matters; the payload is discarded.
    pub async fn ping(&self) -> TransportResult<()> {
        self.transport.call(&Endpoint::Stats, None).await?;
        Ok(())
    }

    /// Asks the backend to deliver a file through the bot.
    pub async fn request_download(&self, file_id: u64, request: &DownloadRequest) -> TransportResult<DownloadAck> {
        let body = serde_json::to_value(request)?;
        self.call_typed(&Endpoint::Download(file_id), Some(body)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::transport::MockTransport;

    fn mock_client() -> ApiClient {
        ApiClient::new(Arc::new(MockTransport::new()))
    }

    #[tokio::test]
    async fn typed_user_status_over_mock() {
        let client = mock_client();
        let identity = IdentityRequest {
            user_id: Some(7),
            ..Default::default()
        };
        let status = client.user_status(&identity).await.unwrap();
        assert_eq!(status.user_id, 7);
    }

    #[tokio::test]
    async fn typed_counts_and_pages_agree() {
        let client = mock_client();
        let counts = client.file_counts().await.unwrap();
        let page = client.files(FileCategory::Premium, &FileQuery::default()).await.unwrap();
        assert_eq!(page.pagination.total_files, counts.premium_count);
    }

    #[tokio::test]
    async fn schema_mismatch_surfaces_as_parse() {
        // Stats replies with a shape that is not a UserStatus
        let client = mock_client();
        let result: TransportResult<UserStatus> = client.call_typed(&Endpoint::Stats, None).await;
        assert!(matches!(result.unwrap_err(), TransportError::Parse(_)));
    }
}
