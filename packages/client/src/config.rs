use std::env;
use std::time::Duration;

use bayline_core::DEFAULT_HTTP_TIMEOUT_SECS;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, no trailing slash.
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let base_url = env::var("BAYLINE_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string());
        Self::new(base_url)
    }

    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_stripped() {
        let config = ClientConfig::new("http://localhost:8000/");
        assert_eq!(config.base_url, "http://localhost:8000");
    }
}
