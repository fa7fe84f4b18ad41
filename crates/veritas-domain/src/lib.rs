//! Veritas Domain Layer
//!
//! Core vocabulary for content credibility analysis. This crate has no
//! external dependencies: wire formats, transports and presentation live in
//! the crates layered on top of it.
//!
//! ## Key Concepts
//!
//! - **Modality**: the kind of content submitted (text, URL, image, video)
//! - **AnalysisRequest**: one submission, consumed by a single remote exchange
//! - **AnalysisResult**: the remote verdict, with a credibility score in [0, 1]
//! - **CredibilityLevel**: coarse bands used when displaying a score

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod credibility;
pub mod modality;
pub mod request;
pub mod result;

// Re-exports for convenience
pub use credibility::{as_percent, CredibilityLevel, CredibilityTone};
pub use modality::Modality;
pub use request::{AnalysisRequest, Attachment};
pub use result::{AnalysisDetails, AnalysisResult, ContentFlags};
