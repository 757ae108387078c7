//! JSON output formatter

use miette::{IntoDiagnostic, Result};
use prooflint_core::AnalysisReport;

pub fn output_json(reports: &[AnalysisReport]) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(reports).into_diagnostic()?
    );
    Ok(())
}
