//! Outbound HTTP client
//!
//! One pooled `reqwest::Client` is built at startup and shared by every
//! request; timeouts here are the only timeout policy for calls to the
//! external auth service.

use std::time::Duration;

/// Outbound HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Whole-request timeout
    pub timeout: Duration,
    /// TCP/TLS connect timeout
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
            user_agent: concat!("cafetal-portal/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpClientConfig {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Failed to build HTTP client: {0}")]
pub struct HttpClientError(#[from] reqwest::Error);

/// Build the shared client
pub fn build_client(config: &HttpClientConfig) -> Result<reqwest::Client, HttpClientError> {
    let client = reqwest::Client::builder()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(client)
}
