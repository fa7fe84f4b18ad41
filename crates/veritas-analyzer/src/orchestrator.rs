//! Analysis orchestrator.
//!
//! Owns the single [`OrchestratorState`] and drives one remote exchange per
//! analyze action. Overlapping calls are not rejected; instead every call
//! takes a fresh [`RequestToken`] and only the holder of the current token
//! may publish its outcome. `reset()` also advances the token, so a response
//! that arrives after a tab switch is dropped instead of resurfacing.

use crate::state::OrchestratorState;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{Context, Poll};
use tokio::sync::watch;
use tracing::{debug, info, warn};
use veritas_domain::{AnalysisRequest, AnalysisResult, Attachment, Modality};
use veritas_sdk::{AnalysisClient, AnalysisError, ClientConfig, SdkError};

/// Monotonic stamp identifying one analyze call
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestToken(u64);

impl RequestToken {
    fn next(self) -> Self {
        RequestToken(self.0 + 1)
    }

    /// Raw sequence number
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// The remote half of an analyze call
///
/// The state has already moved to `InFlight` by the time this exists.
/// Awaiting it (or spawning it) performs the exchange and publishes the
/// outcome if the request is still current. Dropping it abandons the
/// exchange; the state stays `InFlight` until the next reset or request.
#[must_use = "the exchange only runs when the pending analysis is awaited or spawned"]
pub struct PendingAnalysis {
    token: RequestToken,
    modality: Modality,
    future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
}

impl PendingAnalysis {
    /// Token stamped on this request
    pub fn token(&self) -> RequestToken {
        self.token
    }

    /// Modality being analyzed
    pub fn modality(&self) -> Modality {
        self.modality
    }
}

impl Future for PendingAnalysis {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        self.get_mut().future.as_mut().poll(cx)
    }
}

impl fmt::Debug for PendingAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingAnalysis")
            .field("token", &self.token)
            .field("modality", &self.modality)
            .finish_non_exhaustive()
    }
}

struct Inner {
    client: AnalysisClient,
    state: watch::Sender<OrchestratorState>,
    current: Mutex<RequestToken>,
}

/// Analysis orchestrator
///
/// Cloning is cheap; clones share the same state and token sequence.
#[derive(Clone)]
pub struct Orchestrator {
    inner: Arc<Inner>,
}

impl Orchestrator {
    /// Create an orchestrator using the given client
    pub fn new(client: AnalysisClient) -> Self {
        let (state, _) = watch::channel(OrchestratorState::Idle);
        Self {
            inner: Arc::new(Inner {
                client,
                state,
                current: Mutex::new(RequestToken::default()),
            }),
        }
    }

    /// Create an orchestrator talking HTTP to the configured service
    pub fn from_config(config: ClientConfig) -> Result<Self, SdkError> {
        Ok(Self::new(AnalysisClient::new(config)?))
    }

    /// The underlying client
    pub fn client(&self) -> &AnalysisClient {
        &self.inner.client
    }

    /// Snapshot of the current state
    pub fn state(&self) -> OrchestratorState {
        self.inner.state.borrow().clone()
    }

    /// Receive every state transition
    pub fn subscribe(&self) -> watch::Receiver<OrchestratorState> {
        self.inner.state.subscribe()
    }

    /// Whether a request is in flight
    pub fn is_analyzing(&self) -> bool {
        self.inner.state.borrow().is_in_flight()
    }

    /// Token of the most recent request or reset
    pub fn current_token(&self) -> RequestToken {
        *self.lock_current()
    }

    /// Return to `Idle`, superseding any in-flight request
    pub fn reset(&self) {
        let mut current = self.lock_current();
        *current = current.next();
        debug!(token = current.value(), "orchestrator reset");
        self.inner.state.send_replace(OrchestratorState::Idle);
    }

    /// Start analyzing `request`
    ///
    /// The transition to `InFlight` happens before this returns. Video
    /// requests settle to `Failed` immediately and the returned future is
    /// already complete.
    pub fn submit(&self, request: AnalysisRequest) -> PendingAnalysis {
        let modality = request.modality();
        let token = self.begin(modality);
        info!(%modality, token = token.value(), "analysis dispatched");

        if modality == Modality::Video {
            self.settle(token, Err(AnalysisError::Unsupported(modality)));
            return PendingAnalysis {
                token,
                modality,
                future: Box::pin(std::future::ready(())),
            };
        }

        let this = self.clone();
        PendingAnalysis {
            token,
            modality,
            future: Box::pin(async move {
                let outcome = this.inner.client.analyze(&request).await;
                this.settle(token, outcome);
            }),
        }
    }

    /// Analyze free text
    pub async fn analyze_text(&self, body: impl Into<String>) {
        self.submit(AnalysisRequest::Text { body: body.into() }).await
    }

    /// Analyze a web address
    pub async fn analyze_url(&self, address: impl Into<String>) {
        self.submit(AnalysisRequest::Url {
            address: address.into(),
        })
        .await
    }

    /// Analyze an image upload
    pub async fn analyze_image(&self, payload: Attachment) {
        self.submit(AnalysisRequest::Image { payload }).await
    }

    /// Analyze a video upload; always fails without a remote call
    pub async fn analyze_video(&self, payload: Attachment) {
        self.submit(AnalysisRequest::Video {
            payload: Some(payload),
        })
        .await
    }

    fn lock_current(&self) -> MutexGuard<'_, RequestToken> {
        self.inner
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Take a fresh token and enter `InFlight`.
    fn begin(&self, modality: Modality) -> RequestToken {
        let mut current = self.lock_current();
        *current = current.next();
        self.inner
            .state
            .send_replace(OrchestratorState::InFlight { modality });
        *current
    }

    /// Publish an outcome if `token` is still current. Returns whether it was published.
    fn settle(&self, token: RequestToken, outcome: Result<AnalysisResult, AnalysisError>) -> bool {
        let current = self.lock_current();
        if *current != token {
            warn!(
                token = token.value(),
                current = current.value(),
                "discarding response for superseded request"
            );
            return false;
        }

        let state = match outcome {
            Ok(result) => {
                info!(
                    modality = %result.modality,
                    score = result.credibility_score,
                    "analysis succeeded"
                );
                OrchestratorState::Succeeded(result)
            }
            Err(e) => {
                warn!(error = %e, "analysis failed");
                OrchestratorState::Failed(e.to_string())
            }
        };
        debug!(token = token.value(), state = state.name(), "publishing state");
        self.inner.state.send_replace(state);
        true
    }
}

impl fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Token lock before the watch borrow, the same order as `begin`/`reset`/`settle`.
        let current = self.current_token();
        let state = self.inner.state.borrow().name();
        f.debug_struct("Orchestrator")
            .field("state", &state)
            .field("current", &current)
            .finish()
    }
}
