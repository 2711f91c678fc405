//! Client configuration

/// Base URL used when `POS_API_URL` is not set
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for connecting to the cart/product backend
///
/// Base URL and timeout are externally supplied; the tax rate and polling
/// interval are fixed constants, not configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8000")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration with the default timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Read configuration from the environment, loading a `.env` file when
    /// present. Falls back to [`DEFAULT_BASE_URL`] if `POS_API_URL` is unset.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        match std::env::var("POS_API_URL") {
            Ok(url) => Self::new(url),
            Err(_) => {
                tracing::warn!("POS_API_URL not set, using default {}", DEFAULT_BASE_URL);
                Self::new(DEFAULT_BASE_URL)
            }
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ApiResult<crate::HttpClient> {
        crate::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
