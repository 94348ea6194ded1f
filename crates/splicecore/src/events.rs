//! External event dispatch.
//!
//! The host environment (browser bridge, shell, tests) translates its
//! signals into [`ExternalEvent`]s; the dispatcher maps each event kind to
//! an async handler over the session. This replaces ad-hoc listener
//! wiring with one explicit table, independent of any UI toolkit.

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::collections::HashMap;
use std::sync::Arc;

use crate::session::Session;
use crate::status::ConnectionState;

/// Signals the host can deliver to the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExternalEvent {
    /// Connectivity came back
    Online,
    /// Connectivity was lost
    Offline,
    /// The page became visible again
    BecameVisible,
    /// The user asked for a manual reload
    RetryRequested,
}

/// Async handler over the shared session.
pub type EventHandler = Box<dyn Fn(Arc<Session>) -> BoxFuture<'static, ()> + Send + Sync>;

/// Dispatch table from event kind to handler.
pub struct Dispatcher {
    table: HashMap<ExternalEvent, EventHandler>,
}

impl Dispatcher {
    /// Empty table; every event is ignored until registered.
    pub fn new() -> Self {
        Self { table: HashMap::new() }
    }

    /// The standard storefront wiring:
    /// - `Online` hides the banner and re-runs the bootstrap;
    /// - `Offline` shows the offline banner;
    /// - `BecameVisible` and `RetryRequested` re-run the bootstrap.
    ///
    /// Re-runs coalesce into any in-flight sequence via the sequencer's
    /// own guard, so a burst of events cannot start overlapping attempts.
    pub fn with_defaults() -> Self {
        let mut dispatcher = Self::new();

        dispatcher.on(ExternalEvent::Online, |session| {
            async move {
                session.status().clear();
                let _ = session.bootstrap().await;
            }
            .boxed()
        });

        dispatcher.on(ExternalEvent::Offline, |session| {
            async move {
                session.status().set(ConnectionState::Offline);
            }
            .boxed()
        });

        dispatcher.on(ExternalEvent::BecameVisible, |session| {
            async move {
                let _ = session.bootstrap().await;
            }
            .boxed()
        });

        dispatcher.on(ExternalEvent::RetryRequested, |session| {
            async move {
                let _ = session.bootstrap().await;
            }
            .boxed()
        });

        dispatcher
    }

    /// Registers (or replaces) the handler for an event kind.
    pub fn on<F>(&mut self, event: ExternalEvent, handler: F)
    where
        F: Fn(Arc<Session>) -> BoxFuture<'static, ()> + Send + Sync + 'static,
    {
        self.table.insert(event, Box::new(handler));
    }

    /// Runs the handler for `event`, if one is registered. Returns whether
    /// the event was handled.
    pub async fn dispatch(&self, event: ExternalEvent, session: Arc<Session>) -> bool {
        match self.table.get(&event) {
            Some(handler) => {
                handler(session).await;
                true
            }
            None => {
                log::debug!("no handler registered for {event:?}");
                false
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::with_defaults()
    }
}
