//! Client configuration

use crate::error::ClientResult;
use crate::gateway::HttpProductGateway;
use crate::http::NetworkHttpClient;

/// Configuration for connecting to the inventory API
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | API_BASE_URL | http://localhost:3000/api | Backend base URL |
/// | REQUEST_TIMEOUT_SECS | 30 | Request timeout in seconds |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g. "http://localhost:3000/api")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Create a new configuration with the default timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 30,
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to their defaults.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000/api".into()),
            timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = seconds;
        self
    }

    /// Create the HTTP gateway from this configuration
    pub fn build_gateway(&self) -> ClientResult<HttpProductGateway> {
        Ok(HttpProductGateway::new(NetworkHttpClient::new(self)?))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_default_timeout() {
        let config = ClientConfig::new("http://inventario.local/api");
        assert_eq!(config.base_url, "http://inventario.local/api");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn with_timeout_overrides() {
        let config = ClientConfig::new("http://inventario.local/api").with_timeout(5);
        assert_eq!(config.timeout_secs, 5);
    }
}
