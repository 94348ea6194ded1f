//! Per-run session context.
//!
//! One `Session` is constructed at startup and owns everything the
//! storefront core needs: the static configuration, the typed client over
//! the selected transport, the status reporter, and the bootstrap
//! sequencer. There is no global application state; callers hand the
//! session (usually as an `Arc`) to whatever needs it and drop it on the
//! way out.

use std::sync::Arc;

use crate::api::IdentityRequest;
use crate::bootstrap::{BootstrapOutcome, BootstrapSequencer};
use crate::client::ApiClient;
use crate::config::{ApiMode, SessionConfig};
use crate::error::TransportResult;
use crate::status::{StatusReporter, StatusSink};
use crate::transport::{HttpTransport, MockTransport, Transport};

pub struct Session {
    config: SessionConfig,
    client: ApiClient,
    status: Arc<StatusReporter>,
    sequencer: BootstrapSequencer,
}

impl Session {
    /// Builds a session whose status changes are rendered through the
    /// `log` facade.
    pub fn new(config: SessionConfig, identity: IdentityRequest) -> TransportResult<Self> {
        let status = Arc::new(StatusReporter::new());
        Self::assemble(config, identity, status)
    }

    /// Builds a session with a custom status sink (a real UI, or a test
    /// recorder).
    pub fn with_sink(
        config: SessionConfig,
        identity: IdentityRequest,
        sink: Arc<dyn StatusSink>,
    ) -> TransportResult<Self> {
        let status = Arc::new(StatusReporter::with_sink(sink));
        Self::assemble(config, identity, status)
    }

    fn assemble(
        config: SessionConfig,
        identity: IdentityRequest,
        status: Arc<StatusReporter>,
    ) -> TransportResult<Self> {
        let transport: Arc<dyn Transport> = match config.api_mode {
            ApiMode::Server => Arc::new(HttpTransport::new(&config)?),
            ApiMode::Mock => Arc::new(MockTransport::new()),
        };
        let client = ApiClient::new(transport);
        let sequencer = BootstrapSequencer::new(client.clone(), Arc::clone(&status), identity, &config);

        Ok(Self {
            config,
            client,
            status,
            sequencer,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn status(&self) -> &StatusReporter {
        &self.status
    }

    pub fn sequencer(&self) -> &BootstrapSequencer {
        &self.sequencer
    }

    /// Runs (or coalesces into) the bootstrap sequence.
    pub async fn bootstrap(&self) -> BootstrapOutcome {
        self.sequencer.run().await
    }
}
