//! End-to-end pipeline tests over the library API.
//!
//! Drives the analyzer on real text and asserts on the assembled report:
//! line fidelity, findings, filtering, and determinism.

use pretty_assertions::assert_eq;
use prooflint_core::{CategoryId, CheckConfig, DocumentAnalyzer, Segmenter};

fn analyzer(config: CheckConfig) -> DocumentAnalyzer {
    DocumentAnalyzer::new(config).unwrap()
}

mod segmentation {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn test_every_physical_line_is_preserved() {
        let text = "The meeting ran long.\n\nWe agreed that he could\nof won the argument.\nNobody minded.\n";
        let document = Segmenter::segment("notes.txt", text).unwrap();

        assert_eq!(document.lines.len(), 5);
        for (i, line) in document.lines.iter().enumerate() {
            assert_eq!(line.line_number, (i + 1) as u32);
        }
        assert!(document.lines[1].sentences.is_empty());
        // Line 3 only starts a sentence; it terminates on line 4.
        assert!(document.lines[2].sentences.is_empty());
        assert_eq!(document.lines[3].continuation_from, Some(3));
        assert_eq!(
            document.lines[3].sentences[0],
            "We agreed that he could of won the argument."
        );
    }

    #[tokio::test]
    async fn test_blank_lines_never_produce_findings() {
        let engine = analyzer(CheckConfig::default());
        let report = engine
            .analyze("draft.txt", "He could of won.\n\nShe should of known.\n")
            .await
            .unwrap();

        assert_eq!(report.summary.lines_total, 3);
        assert_eq!(report.summary.total_issues, 2);
        assert!(report.issues.iter().all(|f| f.line_number != 2));
    }

    #[tokio::test]
    async fn test_wrapped_sentence_findings_span_lines() {
        let engine = analyzer(CheckConfig::default());
        let text = "The meeting went long.\nWe agreed that he could\nof won the argument.\n";
        let report = engine.analyze("notes.txt", text).await.unwrap();

        assert_eq!(report.summary.total_issues, 1);
        let finding = &report.issues[0];
        assert_eq!(finding.line_number, 3);
        assert_eq!(finding.line_range.to_string(), "2-3");
        assert!(finding.suggestion.contains("could have"));
    }

    #[tokio::test]
    async fn test_empty_and_whitespace_documents() {
        let engine = analyzer(CheckConfig::default());

        let empty = engine.analyze("empty.txt", "").await.unwrap();
        assert_eq!(empty.summary.lines_total, 0);
        assert_eq!(empty.summary.total_issues, 0);

        let blank = engine.analyze("blank.txt", "   \n\t\n").await.unwrap();
        assert_eq!(blank.summary.lines_total, 2);
        assert_eq!(blank.summary.total_issues, 0);
    }
}

mod findings {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn test_homophone_sentence_reports_each_error_separately() {
        let config = CheckConfig {
            categories: vec![CategoryId::Grammar, CategoryId::Punctuation],
            ..CheckConfig::default()
        };
        let engine = analyzer(config);
        let report = engine
            .analyze("draft.txt", "Their going too the store, and its fine.\n")
            .await
            .unwrap();

        assert_eq!(report.summary.total_issues, 2);
        let suggestions: Vec<&str> = report.issues.iter().map(|f| f.suggestion.as_str()).collect();
        assert!(suggestions.iter().any(|s| s.contains("they're going")));
        assert!(suggestions.iter().any(|s| s.contains("to the")));
        for finding in &report.issues {
            assert_eq!(finding.line_number, 1);
            assert_eq!(finding.category, CategoryId::Grammar);
            assert!(finding.confidence >= 0.8);
        }
    }

    #[tokio::test]
    async fn test_contractions_do_not_trip_agreement_rules() {
        let config = CheckConfig {
            categories: vec![CategoryId::Agreement],
            ..CheckConfig::default()
        };
        let engine = analyzer(config);
        let report = engine
            .analyze("draft.txt", "It's raining and she's happy about it.\n")
            .await
            .unwrap();

        assert_eq!(report.summary.total_issues, 0);
    }

    #[tokio::test]
    async fn test_category_narrowing_drops_other_findings() {
        let text = "He could of won, and the committee will recieve the report.\n";

        let all = analyzer(CheckConfig {
            categories: vec![CategoryId::Grammar, CategoryId::Spelling],
            ..CheckConfig::default()
        });
        let narrowed = analyzer(CheckConfig {
            categories: vec![CategoryId::Spelling],
            ..CheckConfig::default()
        });

        let full = all.analyze("draft.txt", text).await.unwrap();
        let spelling_only = narrowed.analyze("draft.txt", text).await.unwrap();

        assert_eq!(full.summary.total_issues, 2);
        assert_eq!(spelling_only.summary.total_issues, 1);
        assert_eq!(spelling_only.issues[0].category, CategoryId::Spelling);
        assert!(spelling_only.issues[0].suggestion.contains("receive"));
    }
}

mod filtering {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn test_threshold_is_inclusive() {
        let text = "That movie was alright.\n";

        let default_run = analyzer(CheckConfig {
            categories: vec![CategoryId::Spelling],
            ..CheckConfig::default()
        });
        let report = default_run.analyze("review.txt", text).await.unwrap();
        assert_eq!(report.summary.total_issues, 0);

        let lowered = analyzer(CheckConfig {
            categories: vec![CategoryId::Spelling],
            confidence_threshold: 0.7,
            ..CheckConfig::default()
        });
        let report = lowered.analyze("review.txt", text).await.unwrap();
        assert_eq!(report.summary.total_issues, 1);
        assert_eq!(report.issues[0].confidence, 0.7);
        assert!(report.issues[0].suggestion.contains("all right"));
    }

    #[tokio::test]
    async fn test_reported_confidence_stays_within_bounds() {
        let config = CheckConfig {
            categories: CategoryId::ALL.to_vec(),
            confidence_threshold: 0.6,
            ..CheckConfig::default()
        };
        let engine = analyzer(config);
        let text = "i recieve alot of emails tommorow.\n\
                    He could of went to the the office.\n\
                    They was very very happy, ,and its fine.\n\
                    In order to utilize the tool, click here.\n\
                    The report was wrote by the team at this point in time.\n";
        let report = engine.analyze("draft.txt", text).await.unwrap();

        assert!(report.summary.total_issues > 5);
        for finding in &report.issues {
            assert!((0.0..=1.0).contains(&finding.confidence), "{}", finding.problem);
            assert!(finding.confidence >= 0.6);
        }
    }
}

mod determinism {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn test_identical_runs_produce_identical_reports() {
        let config = CheckConfig {
            categories: CategoryId::ALL.to_vec(),
            concurrency: 4,
            ..CheckConfig::default()
        };
        let engine = analyzer(config);
        let text = "He could of won the race.\n\
                    The committee will recieve the report tommorow.\n\
                    Their going too the store after lunch.\n\
                    It was a a very long day untill the end.\n";

        let mut reports = Vec::new();
        for _ in 0..3 {
            let report = engine.analyze("draft.txt", text).await.unwrap();
            reports.push(serde_json::to_value(&report).unwrap());
        }

        assert_eq!(reports[0], reports[1]);
        assert_eq!(reports[1], reports[2]);
    }

    #[tokio::test]
    async fn test_findings_arrive_in_document_order() {
        let engine = analyzer(CheckConfig {
            concurrency: 8,
            ..CheckConfig::default()
        });
        let text = "She should of known.\nHe could of won.\nThey would of stayed.\nIt might of happened.\n";
        let report = engine.analyze("draft.txt", text).await.unwrap();

        assert_eq!(report.summary.total_issues, 4);
        let lines: Vec<u32> = report.issues.iter().map(|f| f.line_number).collect();
        assert_eq!(lines, vec![1, 2, 3, 4]);
    }
}
