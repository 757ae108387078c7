//! Text output formatter

use prooflint_core::{AnalysisReport, FindingSource};

pub fn output_text(reports: &[AnalysisReport]) {
    for report in reports {
        if report.issues.is_empty() && report.summary.warnings.is_empty() {
            continue;
        }

        println!("\n{}:", report.filename);
        for finding in &report.issues {
            let source = match finding.source {
                FindingSource::Pattern => "",
                FindingSource::Llm => " (llm)",
            };
            println!(
                "  line {} [{}]{}: {}",
                finding.line_range, finding.category, source, finding.problem
            );
            println!("    suggestion: {}", finding.suggestion);
            if let Some(corrected) = &finding.corrected_sentence {
                println!("    corrected:  {corrected}");
            }
        }

        for warning in &report.summary.warnings {
            println!("  warning: {warning}");
        }
    }

    let total_files = reports.len();
    let total_issues: usize = reports.iter().map(|r| r.summary.total_issues).sum();
    let skipped: usize = reports.iter().map(|r| r.summary.skipped_sentences).sum();

    println!();
    if skipped > 0 {
        println!(
            "Checked {total_files} files, found {total_issues} issues ({skipped} sentences skipped)"
        );
    } else {
        println!("Checked {total_files} files, found {total_issues} issues");
    }
}
