//! Analysis verdicts returned by the classification service

use crate::{CredibilityLevel, Modality};

/// Independent warning flags attached to a verdict
///
/// No flag implies another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContentFlags {
    /// Content looks like misinformation
    pub potential_misinformation: bool,
    /// Content should be checked against other sources
    pub needs_fact_checking: bool,
    /// Content shows signs of bias
    pub bias_detected: bool,
    /// Content appears edited or manipulated
    pub manipulated_content: bool,
}

impl ContentFlags {
    /// Whether any flag is raised
    pub fn any(&self) -> bool {
        self.potential_misinformation
            || self.needs_fact_checking
            || self.bias_detected
            || self.manipulated_content
    }
}

/// Supporting details for a verdict
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalysisDetails {
    /// Sentiment label, when the classifier produces one
    pub sentiment: Option<String>,
    /// Classifier confidence in [0, 1]
    pub confidence: f64,
    /// Salient terms, most relevant first
    pub key_terms: Vec<String>,
    /// Raw classifier label, when supplied
    pub classification: Option<String>,
    /// Suggested next step for the reader, when supplied
    pub recommendation: Option<String>,
}

/// The remote verdict for one analysis request
///
/// Values are kept exactly as received: no rounding, no deduplication of
/// sources or key terms.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    /// Modality that produced this verdict
    pub modality: Modality,
    /// Estimated trustworthiness in [0, 1], higher is more credible
    pub credibility_score: f64,
    /// Free-text explanation
    pub narrative: String,
    /// Warning flags
    pub flags: ContentFlags,
    /// Reference identifiers, most relevant first
    pub cited_sources: Vec<String>,
    /// Supporting details
    pub details: AnalysisDetails,
}

impl AnalysisResult {
    /// Display band for the credibility score
    pub fn credibility_level(&self) -> CredibilityLevel {
        CredibilityLevel::from_score(self.credibility_score)
    }
}
