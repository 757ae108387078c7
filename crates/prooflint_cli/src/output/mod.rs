//! Output formatting module

mod json;
mod text;

use miette::Result;
use prooflint_core::AnalysisReport;

pub fn output_reports(reports: &[AnalysisReport], format: &str) -> Result<bool> {
    let has_issues = reports.iter().any(|r| r.summary.total_issues > 0);

    match format {
        "json" => json::output_json(reports)?,
        _ => text::output_text(reports),
    }

    Ok(has_issues)
}
