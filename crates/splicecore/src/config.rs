use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Configuration constants for the storefront client

/// Backend base URL
/// Read once at startup from SUPPLY_API_BASE_URL or defaults to the hosted API
pub static API_BASE_URL: Lazy<String> =
    Lazy::new(|| env::var("SUPPLY_API_BASE_URL").unwrap_or_else(|_| "https://api.splice-supply.app".to_string()));

/// Raw Telegram init data relayed to the backend on every request
/// Read from SUPPLY_INIT_DATA; empty when running outside Telegram
pub static TELEGRAM_INIT_DATA: Lazy<String> =
    Lazy::new(|| env::var("SUPPLY_INIT_DATA").unwrap_or_else(|_| String::new()));

/// Log file path for the client shell
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("SUPPLY_LOG_FILE").unwrap_or_else(|_| "splice-supply.log".to_string()));

/// API request configuration
pub mod api {
    use super::Duration;

    /// Request timeout for API calls (in milliseconds)
    pub const TIMEOUT_MS: u64 = 10_000;

    /// Number of bootstrap attempts before falling back to the built-in catalog
    pub const RETRIES: u32 = 3;

    /// Base delay between bootstrap attempts (in milliseconds);
    /// attempt n waits `RETRY_DELAY_MS * n`
    pub const RETRY_DELAY_MS: u64 = 1_000;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_millis(TIMEOUT_MS)
    }

    /// Base retry delay duration
    pub fn retry_delay() -> Duration {
        Duration::from_millis(RETRY_DELAY_MS)
    }
}

/// Catalog pagination configuration
pub mod pagination {
    /// Files shown per catalog page
    pub const FILES_PER_PAGE: u32 = 6;

    /// Hard cap on page numbers accepted from the outside
    pub const MAX_PAGES: u32 = 100;
}

/// Connectivity monitor configuration
pub mod monitor {
    use super::Duration;

    /// Interval between `/api/stats` liveness probes (in seconds)
    pub const POLL_INTERVAL_SECS: u64 = 30;

    /// Poll interval duration
    pub fn poll_interval() -> Duration {
        Duration::from_secs(POLL_INTERVAL_SECS)
    }
}

/// Which transport backs the API client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMode {
    /// Real HTTP calls against `SessionConfig::base_url`
    Server,
    /// Deterministic in-memory catalog; no network at all
    Mock,
}

impl ApiMode {
    /// Parses a mode string; anything other than `server` means mock.
    /// The hosted-pages deployment of the original storefront always ran
    /// in mock mode, so that is the safe default.
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "server" | "http" | "real" => ApiMode::Server,
            _ => ApiMode::Mock,
        }
    }
}

/// Static configuration bag handed to the session at startup.
///
/// Built once via [`SessionConfig::from_env`] before the core starts and
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Backend base URL (ignored in mock mode)
    pub base_url: String,
    /// Transport selection
    pub api_mode: ApiMode,
    /// Per-request timeout
    pub timeout: Duration,
    /// Bootstrap attempts before degrading to the built-in catalog
    pub retries: u32,
    /// Base delay for linear backoff between attempts
    pub retry_delay: Duration,
    /// Raw Telegram init data forwarded in the `X-Telegram-Init-Data` header
    pub init_data: String,
}

impl SessionConfig {
    /// Reads configuration from the environment, falling back to the
    /// compiled-in defaults for anything unset or unparsable.
    ///
    /// Recognized variables: `SUPPLY_API_BASE_URL`, `SUPPLY_API_MODE`,
    /// `SUPPLY_TIMEOUT_MS`, `SUPPLY_RETRIES`, `SUPPLY_RETRY_DELAY_MS`,
    /// `SUPPLY_INIT_DATA`.
    pub fn from_env() -> Self {
        let timeout_ms = env_parse("SUPPLY_TIMEOUT_MS", api::TIMEOUT_MS);
        let retries = env_parse("SUPPLY_RETRIES", api::RETRIES);
        let retry_delay_ms = env_parse("SUPPLY_RETRY_DELAY_MS", api::RETRY_DELAY_MS);
        let api_mode = env::var("SUPPLY_API_MODE")
            .map(|v| ApiMode::from_str_lossy(&v))
            .unwrap_or(ApiMode::Mock);

        Self {
            base_url: API_BASE_URL.clone(),
            api_mode,
            timeout: Duration::from_millis(timeout_ms),
            retries,
            retry_delay: Duration::from_millis(retry_delay_ms),
            init_data: TELEGRAM_INIT_DATA.clone(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.clone(),
            api_mode: ApiMode::Mock,
            timeout: api::timeout(),
            retries: api::RETRIES,
            retry_delay: api::retry_delay(),
            init_data: String::new(),
        }
    }
}

fn env_parse<T: std::str::FromStr>(var: &str, default: T) -> T {
    env::var(var).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}
