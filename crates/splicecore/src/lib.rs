//! Splice Supply — client-side core of the Telegram Mini App storefront.
//!
//! This library implements everything the storefront shell needs short of
//! actual rendering: the API transport (real HTTP or deterministic mock),
//! the initial-data bootstrap with retry and fallback, the connection
//! status reporter, and the one-way bridge back to the host bot.
//!
//! # Module Structure
//!
//! - `config`: environment-driven configuration and tuning constants
//! - `error`: transport error taxonomy
//! - `api`: endpoint table and request/response schemas
//! - `transport` / `client`: the raw and typed API layers
//! - `catalog`: built-in file catalog used for mock mode and degraded mode
//! - `status`: connection status reporter
//! - `bootstrap`: startup sequencer (retry, backoff, fallback)
//! - `session`: per-run context object owning all of the above
//! - `events` / `monitor`: external signal dispatch and connectivity polling
//! - `bridge`: payload shaping for the Telegram WebApp bridge

pub mod api;
pub mod bootstrap;
pub mod bridge;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod monitor;
pub mod session;
pub mod status;
pub mod transport;
pub mod utils;

// Re-export commonly used types for convenience
pub use api::{FileCategory, FileCounts, FilePage, UserStatus};
pub use bootstrap::{BootstrapOutcome, BootstrapPhase, BootstrapSequencer};
pub use client::ApiClient;
pub use config::{ApiMode, SessionConfig};
pub use error::TransportError;
pub use logging::init_logger;
pub use session::Session;
pub use status::{ConnectionState, StatusReporter};
