//! Veritas Analyzer
//!
//! Turns user submissions into remote classification exchanges and
//! publishes one consistent lifecycle state for a presentation layer.
//!
//! # Architecture
//!
//! - [`SubmissionController`] holds raw per-modality input, validates it and
//!   dispatches to the orchestrator. Validation failures never reach it.
//! - [`Orchestrator`] owns the [`OrchestratorState`] and publishes every
//!   transition on a `tokio::sync::watch` channel. Each request is stamped
//!   with a [`RequestToken`]; responses whose token has been superseded (by
//!   a newer request or a reset) are discarded.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use veritas_analyzer::{Orchestrator, OrchestratorState, SubmissionController};
//! use veritas_sdk::{AnalysisClient, MockTransport};
//!
//! let transport = MockTransport::new();
//! let client = AnalysisClient::with_transport(Arc::new(transport.clone()));
//! let orchestrator = Orchestrator::new(client);
//! let controller = SubmissionController::new(orchestrator.clone());
//!
//! // Empty text never leaves the controller
//! let err = controller.dispatch_current().unwrap_err();
//! assert_eq!(err.to_string(), "No content to analyze");
//! assert_eq!(orchestrator.state(), OrchestratorState::Idle);
//! assert_eq!(transport.call_count(), 0);
//! ```

#![warn(missing_docs)]

mod controller;
mod error;
mod orchestrator;
mod state;

pub use controller::SubmissionController;
pub use error::ValidationError;
pub use orchestrator::{Orchestrator, PendingAnalysis, RequestToken};
pub use state::OrchestratorState;
