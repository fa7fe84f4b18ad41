//! Analyze command implementation.

use crate::attachment::load_attachment;
use crate::cli::{AnalyzeArgs, AnalyzeTarget};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::io::Read;
use std::path::Path;
use veritas_analyzer::{Orchestrator, OrchestratorState, SubmissionController};
use veritas_domain::{AnalysisResult, Modality};

/// Execute the analyze command.
pub async fn execute_analyze(
    args: AnalyzeArgs,
    orchestrator: &Orchestrator,
    formatter: &Formatter,
) -> Result<()> {
    let result = run_analysis(args.target, orchestrator).await?;
    println!("{}", formatter.format_result(&result)?);
    Ok(())
}

/// Fill a controller from `target`, dispatch it and wait for the verdict.
pub async fn run_analysis(
    target: AnalyzeTarget,
    orchestrator: &Orchestrator,
) -> Result<AnalysisResult> {
    let mut controller = SubmissionController::new(orchestrator.clone());
    prepare(&mut controller, target)?;

    controller.dispatch_current()?.await;

    match orchestrator.state() {
        OrchestratorState::Succeeded(result) => Ok(result),
        OrchestratorState::Failed(message) => Err(CliError::AnalysisFailed(message)),
        other => Err(CliError::AnalysisFailed(format!(
            "Analysis ended in unexpected state: {}",
            other.name()
        ))),
    }
}

/// Load the input for `target` into the controller and select its modality.
fn prepare(controller: &mut SubmissionController, target: AnalyzeTarget) -> Result<()> {
    match target {
        AnalyzeTarget::Text { text, stdin } => {
            let body = match (text, stdin) {
                (_, true) => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
                (Some(text), false) => text,
                (None, false) => {
                    return Err(CliError::InvalidInput(
                        "Provide text to analyze or pass --stdin".to_string(),
                    ))
                }
            };
            controller.select_modality(Modality::Text);
            controller.set_text(body);
        }
        AnalyzeTarget::Url { url } => {
            controller.select_modality(Modality::Url);
            controller.set_url_text(url);
        }
        AnalyzeTarget::Image { path } => {
            controller.select_modality(Modality::Image);
            controller.set_attachment(load_attachment(Path::new(&path))?)?;
        }
        AnalyzeTarget::Video { path } => {
            controller.select_modality(Modality::Video);
            controller.set_video_attachment(load_attachment(Path::new(&path))?)?;
        }
    }
    Ok(())
}
