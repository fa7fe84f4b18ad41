//! Veritas Rust SDK
//!
//! Client library for the remote content classification service.
//!
//! # Example
//!
//! ```no_run
//! use veritas_sdk::{AnalysisClient, ClientConfig};
//! use veritas_domain::AnalysisRequest;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AnalysisClient::new(ClientConfig::new("http://localhost:8000"))?;
//!
//! let result = client
//!     .analyze(&AnalysisRequest::Text { body: "The moon is made of cheese".into() })
//!     .await?;
//! println!("credibility: {}", result.credibility_score);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod config;
mod envelope;
mod error;
pub mod mock;
mod transport;

pub use client::AnalysisClient;
pub use config::{ClientConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
pub use envelope::{default_failure_message, ResponseEnvelope};
pub use error::{AnalysisError, SdkError};
pub use mock::MockTransport;
pub use transport::{AnalysisTransport, HealthStatus, HttpTransport, RawResponse};
