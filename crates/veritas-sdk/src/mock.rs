//! Deterministic in-memory transport for tests and offline use.

use crate::error::SdkError;
use crate::transport::{AnalysisTransport, HealthStatus, RawResponse};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use veritas_domain::{AnalysisRequest, Modality};

#[derive(Debug, Clone)]
enum MockReply {
    Response(RawResponse),
    Fault(String),
}

/// Mock transport returning pre-configured replies
///
/// Replies are queued per modality and consumed in order. Clones share the
/// queues, the call counter and the request log.
///
/// # Examples
///
/// ```
/// use veritas_sdk::MockTransport;
/// use veritas_domain::Modality;
///
/// let transport = MockTransport::new();
/// transport.add_response(Modality::Text, 500, r#"{"detail": "Model offline"}"#);
/// assert_eq!(transport.call_count(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    replies: Arc<Mutex<HashMap<Modality, VecDeque<MockReply>>>>,
    requests: Arc<Mutex<Vec<AnalysisRequest>>>,
    call_count: Arc<Mutex<usize>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockTransport {
    /// Create a mock with no replies configured
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and body
    pub fn add_response(&self, modality: Modality, status: u16, body: impl Into<String>) {
        self.push(
            modality,
            MockReply::Response(RawResponse {
                status,
                body: body.into().into_bytes(),
            }),
        );
    }

    /// Queue a `200` response wrapping `result` in a success envelope
    pub fn add_result(&self, modality: Modality, result: serde_json::Value) {
        let body = serde_json::json!({ "result": result }).to_string();
        self.add_response(modality, 200, body);
    }

    /// Queue a network fault
    pub fn add_fault(&self, modality: Modality, message: impl Into<String>) {
        self.push(modality, MockReply::Fault(message.into()));
    }

    /// Number of times `send` was called
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<AnalysisRequest> {
        lock(&self.requests).clone()
    }

    fn push(&self, modality: Modality, reply: MockReply) {
        lock(&self.replies).entry(modality).or_default().push_back(reply);
    }
}

#[async_trait]
impl AnalysisTransport for MockTransport {
    async fn send(&self, request: &AnalysisRequest) -> Result<RawResponse, SdkError> {
        *lock(&self.call_count) += 1;
        lock(&self.requests).push(request.clone());

        let modality = request.modality();
        let reply = lock(&self.replies)
            .get_mut(&modality)
            .and_then(VecDeque::pop_front);

        match reply {
            Some(MockReply::Response(response)) => Ok(response),
            Some(MockReply::Fault(message)) => Err(SdkError::ConnectionError(message)),
            None => Err(SdkError::RequestError(format!(
                "no mock reply configured for {} analysis",
                modality
            ))),
        }
    }

    async fn health(&self) -> Result<HealthStatus, SdkError> {
        Ok(HealthStatus {
            status: "healthy".to_string(),
            models_loaded: Default::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replies_consumed_in_order() {
        let transport = MockTransport::new();
        transport.add_response(Modality::Text, 200, "first");
        transport.add_response(Modality::Text, 500, "second");

        let request = AnalysisRequest::Text {
            body: "hi".to_string(),
        };
        assert_eq!(transport.send(&request).await.unwrap().body, b"first");
        assert_eq!(transport.send(&request).await.unwrap().status, 500);
        assert!(transport.send(&request).await.is_err());
        assert_eq!(transport.call_count(), 3);
    }

    #[tokio::test]
    async fn test_clone_shares_state() {
        let transport = MockTransport::new();
        let other = transport.clone();
        other.add_fault(Modality::Url, "unreachable");

        let request = AnalysisRequest::Url {
            address: "https://example.com".to_string(),
        };
        let err = transport.send(&request).await.unwrap_err();
        assert!(matches!(err, SdkError::ConnectionError(_)));
        assert_eq!(other.call_count(), 1);
        assert_eq!(other.requests(), vec![request]);
    }
}
