//! Connection status reporter.
//!
//! Holds exactly one [`ConnectionState`] at a time and forwards every
//! change to an injected sink (the rendering layer's stand-in). Writes are
//! last-write-wins: the bootstrap sequencer and the connectivity monitor
//! may both set state without coordination.

use std::fmt;
use std::sync::{Arc, Mutex};

/// The banner state shown to the user. Exactly one is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// No banner; everything is fine
    Hidden,
    /// The host reported loss of connectivity
    Offline,
    /// A bootstrap attempt failed and another is scheduled
    Retrying { attempt: u32, max: u32 },
    /// Retries are exhausted or the liveness probe failed
    Error(String),
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionState::Hidden => write!(f, "hidden"),
            ConnectionState::Offline => write!(f, "You are offline"),
            ConnectionState::Retrying { attempt, max } => write!(f, "Retrying... ({attempt}/{max})"),
            ConnectionState::Error(message) => write!(f, "{message}"),
        }
    }
}

/// Where status changes go. Rendering is outside this crate; the default
/// sink just logs, and tests substitute a recording sink.
pub trait StatusSink: Send + Sync {
    fn render(&self, state: &ConnectionState);
}

/// Sink that reports status changes through the `log` facade.
#[derive(Debug, Default)]
pub struct LogSink;

impl StatusSink for LogSink {
    fn render(&self, state: &ConnectionState) {
        match state {
            ConnectionState::Hidden => log::debug!("connection banner hidden"),
            ConnectionState::Offline => log::warn!("connection: offline"),
            ConnectionState::Retrying { attempt, max } => {
                log::warn!("connection: retrying ({attempt}/{max})");
            }
            ConnectionState::Error(message) => log::error!("connection: {message}"),
        }
    }
}

/// Tracks the current connection state and pushes changes to the sink.
pub struct StatusReporter {
    state: Mutex<ConnectionState>,
    sink: Arc<dyn StatusSink>,
}

impl StatusReporter {
    /// Reporter that renders through the `log` facade.
    pub fn new() -> Self {
        Self::with_sink(Arc::new(LogSink))
    }

    /// Reporter with a custom sink (real UI, or a test recorder).
    pub fn with_sink(sink: Arc<dyn StatusSink>) -> Self {
        Self {
            state: Mutex::new(ConnectionState::Hidden),
            sink,
        }
    }

    /// Overwrites the current state and re-renders. Idempotent: setting
    /// the same state again renders the same banner again.
    pub fn set(&self, state: ConnectionState) {
        {
            let mut current = match self.state.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            *current = state.clone();
        }
        self.sink.render(&state);
    }

    /// Hides the banner.
    pub fn clear(&self) {
        self.set(ConnectionState::Hidden);
    }

    /// Snapshot of the current state.
    pub fn current(&self) -> ConnectionState {
        match self.state.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Default for StatusReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        seen: Mutex<Vec<ConnectionState>>,
    }

    impl StatusSink for RecordingSink {
        fn render(&self, state: &ConnectionState) {
            self.seen.lock().unwrap().push(state.clone());
        }
    }

    #[test]
    fn set_overwrites_previous_state() {
        let reporter = StatusReporter::new();
        reporter.set(ConnectionState::Offline);
        reporter.set(ConnectionState::Error("Connection lost".into()));
        assert_eq!(reporter.current(), ConnectionState::Error("Connection lost".into()));
    }

    #[test]
    fn clear_is_idempotent() {
        let reporter = StatusReporter::new();
        reporter.set(ConnectionState::Retrying { attempt: 1, max: 3 });
        reporter.clear();
        let after_once = reporter.current();
        reporter.clear();
        assert_eq!(reporter.current(), after_once);
        assert_eq!(reporter.current(), ConnectionState::Hidden);
    }

    #[test]
    fn every_change_reaches_the_sink() {
        let sink = Arc::new(RecordingSink::default());
        let reporter = StatusReporter::with_sink(sink.clone());
        reporter.set(ConnectionState::Retrying { attempt: 1, max: 3 });
        reporter.set(ConnectionState::Retrying { attempt: 2, max: 3 });
        reporter.clear();
        let seen = sink.seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                ConnectionState::Retrying { attempt: 1, max: 3 },
                ConnectionState::Retrying { attempt: 2, max: 3 },
                ConnectionState::Hidden,
            ]
        );
    }

    #[test]
    fn display_strings_match_the_banner_copy() {
        assert_eq!(ConnectionState::Offline.to_string(), "You are offline");
        assert_eq!(
            ConnectionState::Retrying { attempt: 2, max: 3 }.to_string(),
            "Retrying... (2/3)"
        );
    }
}
