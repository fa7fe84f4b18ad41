//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use veritas_analyzer::OrchestratorState;
use veritas_domain::{as_percent, AnalysisResult, CredibilityTone};
use veritas_sdk::HealthStatus;

/// Output formatter.
#[derive(Debug, Clone)]
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Render an orchestrator state; `None` when there is nothing to show.
    pub fn format_state(&self, state: &OrchestratorState) -> Result<Option<String>> {
        let rendered = match state {
            OrchestratorState::Idle => None,
            OrchestratorState::InFlight { modality } => {
                Some(self.info(&format!("Analyzing {}...", modality.title().to_lowercase())))
            }
            OrchestratorState::Succeeded(result) => Some(self.format_result(result)?),
            OrchestratorState::Failed(message) => Some(self.error(message)),
        };
        Ok(rendered)
    }

    /// Format an analysis verdict.
    pub fn format_result(&self, result: &AnalysisResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_result_json(result),
            OutputFormat::Table => Ok(self.format_result_table(result)),
            OutputFormat::Quiet => Ok(result.credibility_score.to_string()),
        }
    }

    /// Format a verdict as JSON, using the service's field names.
    fn format_result_json(&self, result: &AnalysisResult) -> Result<String> {
        let json = serde_json::json!({
            "type": result.modality.as_str(),
            "credibilityScore": result.credibility_score,
            "analysis": result.narrative,
            "flags": {
                "potentialMisinformation": result.flags.potential_misinformation,
                "needsFactChecking": result.flags.needs_fact_checking,
                "biasDetected": result.flags.bias_detected,
                "manipulatedContent": result.flags.manipulated_content
            },
            "sources": result.cited_sources,
            "details": {
                "sentiment": result.details.sentiment,
                "confidence": result.details.confidence,
                "keyTerms": result.details.key_terms,
                "classification": result.details.classification,
                "recommendation": result.details.recommendation
            }
        });

        Ok(serde_json::to_string_pretty(&json)?)
    }

    /// Format a verdict as a report with tables.
    fn format_result_table(&self, result: &AnalysisResult) -> String {
        let mut out = String::new();

        out.push_str(&format!("{} Analysis\n", result.modality.title().to_uppercase()));

        let score = format!(
            "{}% ({})",
            as_percent(result.credibility_score),
            result.credibility_level().label()
        );
        let score = match CredibilityTone::from_score(result.credibility_score) {
            CredibilityTone::Good => self.colorize(&score, "green"),
            CredibilityTone::Caution => self.colorize(&score, "yellow"),
            CredibilityTone::Poor => self.colorize(&score, "red"),
        };
        out.push_str(&format!("Credibility Score: {}\n\n", score));
        out.push_str(&format!("{}\n\n", result.narrative));

        let flags = &result.flags;
        let mut builder = Builder::default();
        builder.push_record(["Risk", "Status"]);
        builder.push_record([
            "Potential Misinformation",
            if flags.potential_misinformation { "Detected" } else { "Clear" },
        ]);
        builder.push_record([
            "Needs Fact-Checking",
            if flags.needs_fact_checking { "Yes" } else { "No" },
        ]);
        builder.push_record(["Bias Detected", if flags.bias_detected { "Yes" } else { "No" }]);
        builder.push_record([
            "Manipulated Content",
            if flags.manipulated_content { "Suspected" } else { "Clear" },
        ]);
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        out.push_str(&format!("{}\n", table));

        if !result.cited_sources.is_empty() {
            out.push_str("\nSources:\n");
            for source in &result.cited_sources {
                out.push_str(&format!("  ✓ {}\n", source));
            }
        }

        let details = &result.details;
        out.push_str("\nDetails:\n");
        if let Some(sentiment) = &details.sentiment {
            out.push_str(&format!("  Sentiment: {}\n", sentiment));
        }
        if let Some(classification) = &details.classification {
            out.push_str(&format!("  Classification: {}\n", classification));
        }
        out.push_str(&format!("  Confidence: {}%\n", as_percent(details.confidence)));
        if !details.key_terms.is_empty() {
            out.push_str(&format!("  Key Terms: {}\n", details.key_terms.join(", ")));
        }
        if let Some(recommendation) = &details.recommendation {
            out.push_str(&format!("  Recommendation: {}\n", recommendation));
        }

        out.trim_end().to_string()
    }

    /// Format a health report.
    pub fn format_health(&self, health: &HealthStatus) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(health)?),
            OutputFormat::Quiet => Ok(health.status.clone()),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Model", "Loaded"]);
                for (name, loaded) in &health.models_loaded {
                    builder.push_record([name.as_str(), if *loaded { "yes" } else { "no" }]);
                }
                let mut table = builder.build();
                table.with(Style::rounded());

                let status = if health.status == "healthy" {
                    self.success(&format!("Service {}", health.status))
                } else {
                    self.warning(&format!("Service {}", health.status))
                };
                Ok(format!("{}\n{}", status, table))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
