//! Client configuration.

use crate::error::SdkError;
use veritas_domain::Modality;

/// Default analysis service endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

/// Default timeout for analysis requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Analysis service configuration
///
/// Resolved once at startup and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    endpoint: String,
    timeout_secs: u64,
}

impl ClientConfig {
    /// Create a configuration for the given base address
    pub fn new(endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the transport timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Base address of the service
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Transport timeout in seconds
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Check that the endpoint is usable
    pub fn validate(&self) -> Result<(), SdkError> {
        if self.endpoint.is_empty() {
            return Err(SdkError::Config("endpoint must not be empty".to_string()));
        }
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(SdkError::Config(format!(
                "endpoint '{}' must start with http:// or https://",
                self.endpoint
            )));
        }
        if self.timeout_secs == 0 {
            return Err(SdkError::Config("timeout must be at least 1 second".to_string()));
        }
        Ok(())
    }

    /// Analysis route for a modality; video has none
    pub fn analyze_url(&self, modality: Modality) -> Option<String> {
        modality
            .is_remote()
            .then(|| format!("{}/analyze/{}", self.endpoint, modality.as_str()))
    }

    /// Health check route
    pub fn health_url(&self) -> String {
        format!("{}/health", self.endpoint)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = ClientConfig::new("http://api.example.com/");
        assert_eq!(config.endpoint(), "http://api.example.com");
        assert_eq!(
            config.analyze_url(Modality::Text).as_deref(),
            Some("http://api.example.com/analyze/text")
        );
    }

    #[test]
    fn test_routes() {
        let config = ClientConfig::default();
        assert_eq!(
            config.analyze_url(Modality::Url).as_deref(),
            Some("http://localhost:8000/analyze/url")
        );
        assert_eq!(
            config.analyze_url(Modality::Image).as_deref(),
            Some("http://localhost:8000/analyze/image")
        );
        assert_eq!(config.analyze_url(Modality::Video), None);
        assert_eq!(config.health_url(), "http://localhost:8000/health");
    }

    #[test]
    fn test_validate() {
        assert!(ClientConfig::default().validate().is_ok());
        assert!(ClientConfig::new("").validate().is_err());
        assert!(ClientConfig::new("ftp://host").validate().is_err());
        assert!(ClientConfig::default().with_timeout_secs(0).validate().is_err());
    }
}
