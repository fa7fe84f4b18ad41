//! Veritas client implementation.

use crate::config::ClientConfig;
use crate::envelope::decode_response;
use crate::error::{AnalysisError, SdkError};
use crate::transport::{AnalysisTransport, HealthStatus, HttpTransport};
use std::sync::Arc;
use tracing::{debug, warn};
use veritas_domain::{AnalysisRequest, AnalysisResult, Modality};

/// Veritas SDK client
///
/// Performs one exchange per call and maps it to a verdict or an
/// [`AnalysisError`]. Cloning is cheap; clones share the transport.
#[derive(Clone)]
pub struct AnalysisClient {
    transport: Arc<dyn AnalysisTransport>,
}

impl AnalysisClient {
    /// Create a client talking HTTP to the configured service
    pub fn new(config: ClientConfig) -> Result<Self, SdkError> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new(config)?)))
    }

    /// Create a client over any transport
    pub fn with_transport(transport: Arc<dyn AnalysisTransport>) -> Self {
        Self { transport }
    }

    /// Analyze one request
    ///
    /// Video requests fail immediately without touching the transport.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, AnalysisError> {
        let modality = request.modality();
        if modality == Modality::Video {
            return Err(AnalysisError::Unsupported(modality));
        }

        let response = self.transport.send(request).await.map_err(|e| {
            warn!(%modality, error = %e, "analysis exchange failed");
            AnalysisError::from(e)
        })?;

        debug!(%modality, status = response.status, "decoding analysis response");
        decode_response(modality, &response)
    }

    /// Check service health
    pub async fn health(&self) -> Result<HealthStatus, SdkError> {
        self.transport.health().await
    }
}

impl std::fmt::Debug for AnalysisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisClient").finish_non_exhaustive()
    }
}
