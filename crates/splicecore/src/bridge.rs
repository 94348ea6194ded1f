//! Payload shaping for the Telegram WebApp bridge.
//!
//! Inside Telegram the storefront cannot download files itself; it sends
//! a JSON payload back to the host bot over the bridge's one-way channel
//! and the bot delivers the file in chat. This module owns the payload
//! shape and the capability trait; the actual bridge is supplied by the
//! host environment.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Action tag the host bot matches on.
pub const DOWNLOAD_ACTION: &str = "download_file";

/// The payload sent over `WebApp.sendData` for a download request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadSignal {
    pub action: String,
    pub file_id: u64,
    pub user_id: Option<i64>,
    /// Milliseconds since the Unix epoch, for bot-side dedup
    pub timestamp: i64,
}

impl DownloadSignal {
    pub fn new(file_id: u64, user_id: Option<i64>) -> Self {
        Self {
            action: DOWNLOAD_ACTION.to_string(),
            file_id,
            user_id,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

#[derive(Debug, Error)]
pub enum BridgeError {
    /// Running outside Telegram; there is no bridge to send through
    #[error("Telegram WebApp bridge is not available")]
    Unavailable,

    #[error("failed to encode bridge payload: {0}")]
    Encode(String),
}

/// One-way channel to the host bot. Fire-and-forget: the bot answers in
/// chat, not over this channel.
pub trait BridgeSender: Send + Sync {
    fn send_data(&self, payload: &str) -> Result<(), BridgeError>;
}

/// Bridge stand-in for runs outside Telegram; every send fails
/// `Unavailable` and the caller falls back to the API download route.
#[derive(Debug, Default)]
pub struct NullBridge;

impl BridgeSender for NullBridge {
    fn send_data(&self, _payload: &str) -> Result<(), BridgeError> {
        Err(BridgeError::Unavailable)
    }
}

/// Shapes and sends a download request over the bridge. Returns the
/// signal that was sent, for logging and tests.
pub fn send_download_signal(
    bridge: &dyn BridgeSender,
    file_id: u64,
    user_id: Option<i64>,
) -> Result<DownloadSignal, BridgeError> {
    let signal = DownloadSignal::new(file_id, user_id);
    let payload = serde_json::to_string(&signal).map_err(|e| BridgeError::Encode(e.to_string()))?;
    bridge.send_data(&payload)?;
    log::info!("download signal sent to host bot: file_id={file_id}");
    Ok(signal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingBridge {
        payloads: Mutex<Vec<String>>,
    }

    impl BridgeSender for RecordingBridge {
        fn send_data(&self, payload: &str) -> Result<(), BridgeError> {
            self.payloads.lock().unwrap().push(payload.to_string());
            Ok(())
        }
    }

    #[test]
    fn payload_carries_the_shape_the_bot_expects() {
        let bridge = RecordingBridge::default();
        send_download_signal(&bridge, 7, Some(42)).unwrap();

        let payloads = bridge.payloads.lock().unwrap();
        let value: serde_json::Value = serde_json::from_str(&payloads[0]).unwrap();
        assert_eq!(value["action"], "download_file");
        assert_eq!(value["file_id"], 7);
        assert_eq!(value["user_id"], 42);
        assert!(value["timestamp"].as_i64().unwrap() > 0);
    }

    #[test]
    fn null_bridge_reports_unavailable() {
        let err = send_download_signal(&NullBridge, 1, None).unwrap_err();
        assert!(matches!(err, BridgeError::Unavailable));
    }
}
