//! Periodic connectivity monitor.
//!
//! Independently of any in-flight bootstrap, probes the backend's
//! `/api/stats` endpoint on a fixed interval and flips the status banner
//! accordingly. Both this task and the sequencer write the reporter; the
//! race is benign because writes are last-write-wins.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::session::Session;
use crate::status::ConnectionState;

/// Banner text when a liveness probe fails.
pub const LOST_MESSAGE: &str = "Connection lost";

/// Runs one liveness probe and updates the status banner.
pub async fn probe(session: &Session) {
    match session.client().ping().await {
        Ok(()) => session.status().clear(),
        Err(err) => {
            log::warn!("connectivity probe failed: {err}");
            session.status().set(ConnectionState::Error(LOST_MESSAGE.to_string()));
        }
    }
}

/// Spawns the monitor loop. The first probe fires one full period after
/// spawning; bootstrap owns the banner until then.
pub fn spawn(session: Arc<Session>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // interval's first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            probe(&session).await;
        }
    })
}
