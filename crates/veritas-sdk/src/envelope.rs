//! Response envelope decoding.
//!
//! The service wraps every answer in a JSON envelope: `{"result": {...}}` on
//! success, `{"detail": "..."}` on failure. The status code decides which
//! shape is expected; a success body of the wrong shape is a decoding error,
//! never a partially filled result.

use crate::error::AnalysisError;
use crate::transport::RawResponse;
use serde::Deserialize;
use veritas_domain::{AnalysisDetails, AnalysisResult, ContentFlags, Modality};

/// Fallback message when a failure response carries no usable detail
pub fn default_failure_message(modality: Modality) -> &'static str {
    match modality {
        Modality::Text => "Text analysis failed.",
        Modality::Url => "URL analysis failed.",
        Modality::Image => "Image analysis failed.",
        Modality::Video => "Video analysis failed.",
    }
}

/// A decoded response envelope
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseEnvelope {
    /// Success envelope carrying a verdict
    Result(AnalysisResult),
    /// Failure envelope; `None` when the body had no usable detail
    Detail(Option<String>),
}

impl ResponseEnvelope {
    /// Decode a raw response according to its status
    ///
    /// Failure responses never fail to decode: an unreadable body simply has
    /// no detail.
    pub fn decode(response: &RawResponse) -> Result<Self, AnalysisError> {
        if !response.is_success() {
            return Ok(ResponseEnvelope::Detail(extract_detail(&response.body)));
        }

        let envelope: SuccessEnvelope = serde_json::from_slice(&response.body)
            .map_err(|e| AnalysisError::Decoding(e.to_string()))?;
        envelope
            .result
            .into_domain()
            .map(ResponseEnvelope::Result)
            .map_err(AnalysisError::Decoding)
    }

    /// Resolve the envelope into the outcome of an exchange
    pub fn into_outcome(
        self,
        modality: Modality,
        status: u16,
    ) -> Result<AnalysisResult, AnalysisError> {
        match self {
            ResponseEnvelope::Result(result) => Ok(result),
            ResponseEnvelope::Detail(detail) => Err(AnalysisError::Remote {
                status,
                message: detail
                    .unwrap_or_else(|| default_failure_message(modality).to_string()),
            }),
        }
    }
}

/// Decode a response for a request of the given modality
pub(crate) fn decode_response(
    modality: Modality,
    response: &RawResponse,
) -> Result<AnalysisResult, AnalysisError> {
    ResponseEnvelope::decode(response)?.into_outcome(modality, response.status)
}

#[derive(Deserialize)]
struct SuccessEnvelope {
    result: WireResult,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Only a non-empty string detail is shown to users.
fn extract_detail(body: &[u8]) -> Option<String> {
    let envelope: ErrorEnvelope = serde_json::from_slice(body).ok()?;
    match envelope.detail? {
        serde_json::Value::String(detail) if !detail.is_empty() => Some(detail),
        _ => None,
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireResult {
    #[serde(rename = "type", alias = "modality")]
    kind: String,
    credibility_score: f64,
    #[serde(rename = "analysis", alias = "narrative")]
    analysis: String,
    flags: WireFlags,
    #[serde(rename = "sources", alias = "citedSources", default)]
    sources: Vec<String>,
    details: WireDetails,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireFlags {
    potential_misinformation: bool,
    needs_fact_checking: bool,
    bias_detected: bool,
    manipulated_content: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireDetails {
    #[serde(default)]
    sentiment: Option<String>,
    confidence: f64,
    #[serde(default)]
    key_terms: Vec<String>,
    #[serde(default)]
    classification: Option<String>,
    #[serde(default)]
    recommendation: Option<String>,
}

impl WireResult {
    fn into_domain(self) -> Result<AnalysisResult, String> {
        let modality = Modality::parse(&self.kind)
            .ok_or_else(|| format!("unknown result type '{}'", self.kind))?;

        check_unit_range("credibilityScore", self.credibility_score)?;
        check_unit_range("details.confidence", self.details.confidence)?;

        Ok(AnalysisResult {
            modality,
            credibility_score: self.credibility_score,
            narrative: self.analysis,
            flags: ContentFlags {
                potential_misinformation: self.flags.potential_misinformation,
                needs_fact_checking: self.flags.needs_fact_checking,
                bias_detected: self.flags.bias_detected,
                manipulated_content: self.flags.manipulated_content,
            },
            cited_sources: self.sources,
            details: AnalysisDetails {
                sentiment: self.details.sentiment,
                confidence: self.details.confidence,
                key_terms: self.details.key_terms,
                classification: self.details.classification,
                recommendation: self.details.recommendation,
            },
        })
    }
}

fn check_unit_range(field: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(format!("{} {} is outside [0, 1]", field, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            body: body.as_bytes().to_vec(),
        }
    }

    const SAMPLE: &str = r#"{
        "result": {
            "type": "text",
            "credibilityScore": 0.42,
            "analysis": "The text has been flagged as potential FAKE.",
            "flags": {
                "potentialMisinformation": true,
                "needsFactChecking": true,
                "biasDetected": false,
                "manipulatedContent": true
            },
            "sources": ["a", "b", "a"],
            "details": {
                "sentiment": "Negative",
                "confidence": 0.8,
                "keyTerms": ["x", "y"]
            }
        }
    }"#;

    #[test]
    fn test_success_envelope() {
        let result = decode_response(Modality::Text, &response(200, SAMPLE)).unwrap();
        assert_eq!(result.modality, Modality::Text);
        assert_eq!(result.credibility_score, 0.42);
        assert_eq!(result.narrative, "The text has been flagged as potential FAKE.");
        assert!(result.flags.potential_misinformation);
        assert!(!result.flags.bias_detected);
        assert_eq!(result.cited_sources, vec!["a", "b", "a"]);
        assert_eq!(result.details.sentiment.as_deref(), Some("Negative"));
        assert_eq!(result.details.key_terms, vec!["x", "y"]);
    }

    #[test]
    fn test_descriptive_field_names() {
        let body = r#"{"result": {
            "modality": "url",
            "credibilityScore": 0.9,
            "narrative": "fine",
            "flags": {"potentialMisinformation": false, "needsFactChecking": false,
                      "biasDetected": false, "manipulatedContent": false},
            "citedSources": ["s"],
            "details": {"confidence": 0.9}
        }}"#;
        let result = decode_response(Modality::Url, &response(200, body)).unwrap();
        assert_eq!(result.modality, Modality::Url);
        assert_eq!(result.narrative, "fine");
        assert_eq!(result.cited_sources, vec!["s"]);
        assert!(result.details.sentiment.is_none());
        assert!(result.details.key_terms.is_empty());
    }

    #[test]
    fn test_news_result_with_extras() {
        let body = r#"{"result": {
            "type": "news",
            "credibilityScore": 0.91,
            "analysis": "classified as REAL",
            "flags": {"potentialMisinformation": false, "needsFactChecking": false,
                      "biasDetected": false, "manipulatedContent": false,
                      "isReliableNews": true},
            "sources": [],
            "details": {"classification": "REAL", "confidence": 0.91,
                        "credibilityLevel": "High", "keyTerms": [],
                        "recommendation": "Appears credible but always cross-reference"}
        }}"#;
        let result = decode_response(Modality::Text, &response(200, body)).unwrap();
        assert_eq!(result.modality, Modality::Text);
        assert_eq!(result.details.classification.as_deref(), Some("REAL"));
        assert!(result.details.recommendation.is_some());
    }

    #[test]
    fn test_detail_message() {
        let err = decode_response(Modality::Url, &response(500, r#"{"detail": "X"}"#))
            .unwrap_err();
        assert_eq!(
            err,
            AnalysisError::Remote {
                status: 500,
                message: "X".to_string()
            }
        );
        assert_eq!(err.to_string(), "X");
    }

    #[test]
    fn test_default_messages() {
        let cases = [
            (Modality::Text, "Text analysis failed."),
            (Modality::Url, "URL analysis failed."),
            (Modality::Image, "Image analysis failed."),
        ];
        for (modality, expected) in cases {
            let err = decode_response(modality, &response(502, "<html>Bad Gateway</html>"))
                .unwrap_err();
            assert_eq!(err.to_string(), expected);
        }
    }

    #[test]
    fn test_non_string_detail_uses_default() {
        let body = r#"{"detail": [{"loc": ["body", "text"], "msg": "field required"}]}"#;
        let err = decode_response(Modality::Text, &response(422, body)).unwrap_err();
        assert_eq!(err.to_string(), "Text analysis failed.");

        let err = decode_response(Modality::Text, &response(400, r#"{"detail": ""}"#))
            .unwrap_err();
        assert_eq!(err.to_string(), "Text analysis failed.");
    }

    #[test]
    fn test_success_with_detail_is_decoding_error() {
        let err = decode_response(Modality::Text, &response(200, r#"{"detail": "odd"}"#))
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Decoding(_)));
    }

    #[test]
    fn test_out_of_range_score_is_decoding_error() {
        let body = SAMPLE.replace("0.42", "1.5");
        let err = decode_response(Modality::Text, &response(200, &body)).unwrap_err();
        assert!(matches!(err, AnalysisError::Decoding(ref m) if m.contains("credibilityScore")));
    }

    #[test]
    fn test_unknown_type_is_decoding_error() {
        let body = SAMPLE.replace(r#""type": "text""#, r#""type": "audio""#);
        let err = decode_response(Modality::Text, &response(200, &body)).unwrap_err();
        assert!(err.to_string().starts_with("Malformed analysis response"));
    }
}
