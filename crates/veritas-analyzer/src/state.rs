//! Observable orchestrator state.

use veritas_domain::{AnalysisResult, Modality};

/// Lifecycle of the current analysis
///
/// Exactly one variant holds at a time, so a verdict and an error can never
/// be shown together.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OrchestratorState {
    /// Nothing to show
    #[default]
    Idle,

    /// A request is awaiting its response
    InFlight {
        /// Modality being analyzed
        modality: Modality,
    },

    /// The last current request produced a verdict
    Succeeded(AnalysisResult),

    /// The last current request failed; carries the user-facing message
    Failed(String),
}

impl OrchestratorState {
    /// Whether a request is in flight
    pub fn is_in_flight(&self) -> bool {
        matches!(self, OrchestratorState::InFlight { .. })
    }

    /// Whether the state is idle
    pub fn is_idle(&self) -> bool {
        matches!(self, OrchestratorState::Idle)
    }

    /// The verdict, if any
    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            OrchestratorState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    /// The error message, if any
    pub fn error(&self) -> Option<&str> {
        match self {
            OrchestratorState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            OrchestratorState::Idle => "idle",
            OrchestratorState::InFlight { .. } => "in_flight",
            OrchestratorState::Succeeded(_) => "succeeded",
            OrchestratorState::Failed(_) => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veritas_domain::{AnalysisDetails, ContentFlags};

    #[test]
    fn test_result_and_error_are_exclusive() {
        let failed = OrchestratorState::Failed("boom".to_string());
        assert_eq!(failed.error(), Some("boom"));
        assert!(failed.result().is_none());

        let succeeded = OrchestratorState::Succeeded(AnalysisResult {
            modality: Modality::Url,
            credibility_score: 0.5,
            narrative: String::new(),
            flags: ContentFlags::default(),
            cited_sources: Vec::new(),
            details: AnalysisDetails::default(),
        });
        assert!(succeeded.result().is_some());
        assert!(succeeded.error().is_none());
    }

    #[test]
    fn test_default_is_idle() {
        let state = OrchestratorState::default();
        assert!(state.is_idle());
        assert!(!state.is_in_flight());
        assert_eq!(state.name(), "idle");
    }
}
