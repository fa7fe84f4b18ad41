//! Transports to the analysis service.

use crate::config::ClientConfig;
use crate::error::SdkError;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;
use veritas_domain::{AnalysisRequest, Modality};

/// Status and body of a completed exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Health report from the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Overall status (e.g. "healthy")
    pub status: String,
    /// Which classifiers the service has loaded
    #[serde(default)]
    pub models_loaded: BTreeMap<String, bool>,
}

/// Carries analysis requests to the service
///
/// An implementation performs exactly one exchange per `send` call and never
/// retries. A response of any status is `Ok`; `Err` means no response.
#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    /// Send one analysis request
    async fn send(&self, request: &AnalysisRequest) -> Result<RawResponse, SdkError>;

    /// Query the service health endpoint
    async fn health(&self) -> Result<HealthStatus, SdkError>;
}

#[derive(Serialize)]
struct TextPayload<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct UrlPayload<'a> {
    url: &'a str,
}

/// HTTP transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    config: ClientConfig,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport for the given configuration
    pub fn new(config: ClientConfig) -> Result<Self, SdkError> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs()))
            .build()?;

        Ok(Self { config, client })
    }

    fn route(&self, modality: Modality) -> Result<String, SdkError> {
        self.config
            .analyze_url(modality)
            .ok_or(SdkError::Unsupported(modality))
    }
}

#[async_trait]
impl AnalysisTransport for HttpTransport {
    async fn send(&self, request: &AnalysisRequest) -> Result<RawResponse, SdkError> {
        let url = self.route(request.modality())?;
        debug!(%url, modality = %request.modality(), "sending analysis request");

        let builder = self.client.post(&url);
        let builder = match request {
            AnalysisRequest::Text { body } => builder.json(&TextPayload { text: body }),
            AnalysisRequest::Url { address } => builder.json(&UrlPayload { url: address }),
            AnalysisRequest::Image { payload } => {
                let part = Part::bytes(payload.bytes.clone())
                    .file_name(payload.file_name.clone())
                    .mime_str(&payload.media_type)
                    .map_err(|e| {
                        SdkError::RequestError(format!(
                            "Invalid media type '{}': {}",
                            payload.media_type, e
                        ))
                    })?;
                builder.multipart(Form::new().part("file", part))
            }
            AnalysisRequest::Video { .. } => return Err(SdkError::Unsupported(Modality::Video)),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        debug!(status, bytes = body.len(), "analysis response received");
        Ok(RawResponse { status, body })
    }

    async fn health(&self) -> Result<HealthStatus, SdkError> {
        let response = self.client.get(self.config.health_url()).send().await?;

        if !response.status().is_success() {
            return Err(SdkError::ServiceError(response.status().as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_response_success() {
        let ok = RawResponse {
            status: 204,
            body: Vec::new(),
        };
        assert!(ok.is_success());
        let err = RawResponse {
            status: 404,
            body: Vec::new(),
        };
        assert!(!err.is_success());
    }

    #[test]
    fn test_transport_rejects_bad_config() {
        let result = HttpTransport::new(ClientConfig::new("localhost:8000"));
        assert!(matches!(result, Err(SdkError::Config(_))));
    }

    #[tokio::test]
    async fn test_video_is_never_sent() {
        let transport = HttpTransport::new(ClientConfig::default()).unwrap();
        let request = AnalysisRequest::Video {
            payload: Some(veritas_domain::Attachment::new("clip.mp4", "video/mp4", vec![0])),
        };
        let result = transport.send(&request).await;
        assert!(matches!(result, Err(SdkError::Unsupported(Modality::Video))));
    }

    #[test]
    fn test_health_status_parsing() {
        let json = r#"{
            "status": "healthy",
            "models_loaded": {"news_classifier": true, "url_model": false}
        }"#;
        let health: HealthStatus = serde_json::from_str(json).unwrap();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.models_loaded.get("news_classifier"), Some(&true));
        assert_eq!(health.models_loaded.get("url_model"), Some(&false));
    }
}
