//! HTTP timeout configuration shared by every provider

use crate::error::{GateError, GateResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timeout configuration for provider requests
///
/// - **Connection timeout**: time allowed to establish a connection
/// - **Request timeout**: time allowed for the whole exchange, including the
///   full duration of a streamed completion
///
/// # Examples
///
/// ```rust
/// use modelgate_core::config::TimeoutConfig;
///
/// let config = TimeoutConfig::default()
///     .with_connection_timeout_secs(5)
///     .with_request_timeout_secs(120);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Connection timeout in seconds. Default: 30 seconds
    #[serde(default = "TimeoutConfig::default_connection_timeout")]
    pub connection_timeout_secs: u64,

    /// Request timeout in seconds. Default: 300 seconds
    #[serde(default = "TimeoutConfig::default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl TimeoutConfig {
    const fn default_connection_timeout() -> u64 {
        30
    }

    // Streams stay open for the whole generation.
    const fn default_request_timeout() -> u64 {
        300
    }

    /// Set connection timeout in seconds
    pub fn with_connection_timeout_secs(mut self, secs: u64) -> Self {
        self.connection_timeout_secs = secs;
        self
    }

    /// Set request timeout in seconds
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate timeout configuration
    ///
    /// Returns an error if:
    /// - Any timeout is zero
    /// - Request timeout is less than connection timeout
    pub fn validate(&self) -> GateResult<()> {
        if self.connection_timeout_secs == 0 {
            return Err(GateError::config("Connection timeout must be greater than 0"));
        }
        if self.request_timeout_secs == 0 {
            return Err(GateError::config("Request timeout must be greater than 0"));
        }
        if self.request_timeout_secs < self.connection_timeout_secs {
            return Err(GateError::config(format!(
                "Request timeout ({}s) must be >= connection timeout ({}s)",
                self.request_timeout_secs, self.connection_timeout_secs
            )));
        }
        Ok(())
    }

    /// Build an HTTP client honouring these timeouts
    pub fn build_http_client(&self) -> GateResult<reqwest::Client> {
        reqwest::Client::builder()
            .connect_timeout(self.connection_timeout())
            .timeout(self.request_timeout())
            .build()
            .map_err(|e| GateError::config(format!("Failed to create HTTP client: {}", e)))
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connection_timeout_secs: Self::default_connection_timeout(),
            request_timeout_secs: Self::default_request_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeouts() {
        let config = TimeoutConfig::default();
        assert_eq!(config.connection_timeout(), Duration::from_secs(30));
        assert_eq!(config.request_timeout(), Duration::from_secs(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_and_inversion() {
        assert!(TimeoutConfig::default().with_connection_timeout_secs(0).validate().is_err());
        assert!(TimeoutConfig::default().with_request_timeout_secs(0).validate().is_err());
        assert!(TimeoutConfig::default()
            .with_connection_timeout_secs(60)
            .with_request_timeout_secs(10)
            .validate()
            .is_err());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: TimeoutConfig =
            serde_json::from_str(r#"{"request_timeout_secs": 45}"#).unwrap();
        assert_eq!(config.connection_timeout_secs, 30);
        assert_eq!(config.request_timeout_secs, 45);
    }
}
