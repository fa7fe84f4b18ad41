//! Health command implementation.

use crate::error::Result;
use crate::output::Formatter;
use veritas_analyzer::Orchestrator;

/// Execute the health command.
pub async fn execute_health(orchestrator: &Orchestrator, formatter: &Formatter) -> Result<()> {
    let health = orchestrator.client().health().await?;
    println!("{}", formatter.format_health(&health)?);
    Ok(())
}
