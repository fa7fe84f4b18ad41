//! Error types for the Veritas SDK.

use thiserror::Error;
use veritas_domain::Modality;

/// Transport-level errors
#[derive(Debug, Error)]
pub enum SdkError {
    /// Connection error (network, DNS, refused, reset)
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Request did not complete before the transport timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Any other failure while sending or reading a request
    #[error("Request error: {0}")]
    RequestError(String),

    /// The modality has no remote route
    #[error("No remote route for {0} analysis")]
    Unsupported(Modality),

    /// Non-success response from a non-analysis endpoint
    #[error("Service error (HTTP {0})")]
    ServiceError(u16),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Response body could not be parsed
    #[error("JSON parsing error: {0}")]
    Json(String),
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SdkError::Timeout(e.to_string())
        } else if e.is_connect() {
            SdkError::ConnectionError(e.to_string())
        } else if e.is_builder() {
            SdkError::Config(e.to_string())
        } else {
            SdkError::RequestError(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::Json(e.to_string())
    }
}

/// Outcome of a failed analysis exchange
///
/// The `Display` text of each variant is the exact message shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// No response was received (network fault, timeout)
    #[error("{0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("{message}")]
    Remote {
        /// HTTP status code
        status: u16,
        /// Server-supplied detail, or the modality's default message
        message: String,
    },

    /// The modality is not supported at all
    #[error("{} analysis is not yet implemented.", .0.title())]
    Unsupported(Modality),

    /// A success response did not match the expected envelope
    #[error("Malformed analysis response: {0}")]
    Decoding(String),
}

impl From<SdkError> for AnalysisError {
    fn from(e: SdkError) -> Self {
        match e {
            SdkError::Unsupported(modality) => AnalysisError::Unsupported(modality),
            SdkError::Json(message) => AnalysisError::Decoding(message),
            other => AnalysisError::Transport(other.to_string()),
        }
    }
}
