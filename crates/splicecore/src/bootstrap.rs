//! Initial-data bootstrap: load account status and catalog counts before
//! the storefront becomes interactive.
//!
//! One attempt is the two transport calls in order (status, then counts);
//! if either fails the whole attempt is abandoned and retried with linear
//! backoff. After the budget is spent the sequencer fills the session from
//! the built-in catalog and marks the data as fallback instead of failing
//! the app. No transport error escapes [`BootstrapSequencer::run`].

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::api::{FileCounts, IdentityRequest, UserStatus};
use crate::catalog;
use crate::client::ApiClient;
use crate::config::SessionConfig;
use crate::error::TransportResult;
use crate::status::{ConnectionState, StatusReporter};

/// Banner text when the retry budget is exhausted.
pub const EXHAUSTED_MESSAGE: &str = "Unable to connect to server";

/// Lifecycle of one sequencer. `Degraded` is terminal but recoverable:
/// a later `run()` re-enters `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapPhase {
    Idle,
    Loading,
    Success,
    Degraded,
}

/// Where the session data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Fresh from the backend
    Live,
    /// Built-in catalog, after retry exhaustion
    Fallback,
}

/// The data a bootstrap produces. `user` and `counts` always share one
/// source; a live status is never paired with fallback counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub user: UserStatus,
    pub counts: FileCounts,
    pub source: DataSource,
}

/// What one `run()` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// Live data loaded; status banner cleared
    Loaded,
    /// Retry budget spent; session filled from the built-in catalog
    Degraded,
    /// Another sequence was already in flight; nothing was started
    AlreadyLoading,
}

/// Retry accounting for one bootstrap invocation. Discarded on success
/// or exhaustion.
#[derive(Debug)]
pub struct RetryBudget {
    attempt: u32,
    max: u32,
    base_delay: Duration,
}

impl RetryBudget {
    pub fn new(max: u32, base_delay: Duration) -> Self {
        Self {
            // A budget of zero attempts could never produce data at all;
            // one attempt is the floor.
            max: max.max(1),
            attempt: 0,
            base_delay,
        }
    }

    /// Starts the next attempt and returns its 1-based number.
    pub fn begin_attempt(&mut self) -> u32 {
        self.attempt += 1;
        self.attempt
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn exhausted(&self) -> bool {
        self.attempt >= self.max
    }

    /// Linear backoff: attempt n is followed by `base_delay * n`.
    pub fn delay(&self) -> Duration {
        self.base_delay * self.attempt
    }
}

/// Orchestrates the bootstrap sequence against the typed client.
pub struct BootstrapSequencer {
    client: ApiClient,
    status: Arc<StatusReporter>,
    identity: IdentityRequest,
    retries: u32,
    base_delay: Duration,
    phase: Mutex<BootstrapPhase>,
    data: Mutex<Option<SessionData>>,
}

impl BootstrapSequencer {
    pub fn new(
        client: ApiClient,
        status: Arc<StatusReporter>,
        identity: IdentityRequest,
        config: &SessionConfig,
    ) -> Self {
        Self {
            client,
            status,
            identity,
            retries: config.retries,
            base_delay: config.retry_delay,
            phase: Mutex::new(BootstrapPhase::Idle),
            data: Mutex::new(None),
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> BootstrapPhase {
        *lock(&self.phase)
    }

    /// Snapshot of the loaded session data, if any bootstrap finished.
    pub fn data(&self) -> Option<SessionData> {
        lock(&self.data).clone()
    }

    /// Runs the bootstrap sequence to completion.
    ///
    /// Reentrancy guard: if a sequence is already in `Loading`, this call
    /// returns [`BootstrapOutcome::AlreadyLoading`] immediately and starts
    /// nothing — callers that want fresh data coalesce into the in-flight
    /// attempt.
    pub async fn run(&self) -> BootstrapOutcome {
        {
            let mut phase = lock(&self.phase);
            if *phase == BootstrapPhase::Loading {
                log::debug!("bootstrap already in flight, ignoring");
                return BootstrapOutcome::AlreadyLoading;
            }
            *phase = BootstrapPhase::Loading;
        }

        let mut budget = RetryBudget::new(self.retries, self.base_delay);

        loop {
            let attempt = budget.begin_attempt();

            match self.attempt_once().await {
                Ok((user, counts)) => {
                    log::info!("bootstrap succeeded on attempt {}/{}", attempt, budget.max());
                    self.finish(
                        SessionData {
                            user,
                            counts,
                            source: DataSource::Live,
                        },
                        BootstrapPhase::Success,
                    );
                    self.status.clear();
                    return BootstrapOutcome::Loaded;
                }
                Err(err) if !budget.exhausted() => {
                    let delay = budget.delay();
                    log::warn!(
                        "bootstrap attempt {}/{} failed (retrying in {:?}): {}",
                        attempt,
                        budget.max(),
                        delay,
                        err
                    );
                    self.status.set(ConnectionState::Retrying {
                        attempt,
                        max: budget.max(),
                    });
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    log::error!(
                        "bootstrap gave up after {} attempt(s), falling back to built-in catalog: {}",
                        attempt,
                        err
                    );
                    self.status.set(ConnectionState::Error(EXHAUSTED_MESSAGE.to_string()));
                    self.finish(
                        SessionData {
                            user: catalog::fallback_user_status(&self.identity),
                            counts: catalog::counts(),
                            source: DataSource::Fallback,
                        },
                        BootstrapPhase::Degraded,
                    );
                    return BootstrapOutcome::Degraded;
                }
            }
        }
    }

    /// One whole attempt: account status first, then catalog counts.
    /// The counts call is skipped when the status call fails.
    async fn attempt_once(&self) -> TransportResult<(UserStatus, FileCounts)> {
        let user = self.client.user_status(&self.identity).await?;
        let counts = self.client.file_counts().await?;
        Ok((user, counts))
    }

    fn finish(&self, data: SessionData, phase: BootstrapPhase) {
        *lock(&self.data) = Some(data);
        *lock(&self.phase) = phase;
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
