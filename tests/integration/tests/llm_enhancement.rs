//! Enhancement pass tests against a mock chat-completions endpoint.
//!
//! Runs the full analyzer with a real `HttpCompletionClient` pointed at
//! wiremock, covering the happy path, hallucination rejection, budget
//! exhaustion, retry, and API failure.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use prooflint_core::{CategoryId, CheckConfig, DocumentAnalyzer, FindingSource};
use prooflint_llm::{HttpCompletionClient, LlmEnhancer, RetryPolicy};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SENTENCE: &str = "The reason is because we left early.";

/// Config that yields one low-confidence finding in a complex category.
fn awkward_config() -> CheckConfig {
    let mut config = CheckConfig {
        categories: vec![CategoryId::AwkwardPhrasing],
        ..CheckConfig::default()
    };
    config.llm.enabled = true;
    config
}

/// Wraps a model answer in the chat-completions response shape.
fn chat_reply(items: serde_json::Value) -> serde_json::Value {
    let content = serde_json::json!({ "enhancements": items }).to_string();
    serde_json::json!({
        "choices": [
            { "message": { "role": "assistant", "content": content } }
        ],
        "usage": { "prompt_tokens": 200, "completion_tokens": 60, "total_tokens": 260 }
    })
}

fn enhancer_for(server: &MockServer, config: &CheckConfig) -> LlmEnhancer {
    let client = Arc::new(HttpCompletionClient::new(
        server.uri(),
        "gpt-4o-mini",
        "test-key",
    ));
    LlmEnhancer::new(client, config.llm.clone())
}

#[tokio::test]
async fn test_enhancement_rewrites_uncertain_finding() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(serde_json::json!([
            {
                "id": 0,
                "original_text": SENTENCE,
                "problem": "Roundabout causal phrasing",
                "suggestion": "Use \"the reason is that\" or recast the sentence",
                "corrected_sentence": "The reason is that we left early."
            }
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    let config = awkward_config();
    let engine = DocumentAnalyzer::new(config.clone())
        .unwrap()
        .with_enhancer(Arc::new(enhancer_for(&server, &config)));

    let report = engine
        .analyze("draft.txt", &format!("{SENTENCE}\n"))
        .await
        .unwrap();

    assert_eq!(report.summary.total_issues, 1);
    let finding = &report.issues[0];
    assert_eq!(finding.source, FindingSource::Llm);
    assert_eq!(finding.problem, "Roundabout causal phrasing");
    assert_eq!(
        finding.corrected_sentence.as_deref(),
        Some("The reason is that we left early.")
    );
    assert!(report.summary.warnings.is_empty());
}

#[tokio::test]
async fn test_hallucinated_sentence_is_discarded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(serde_json::json!([
            {
                "id": 0,
                "original_text": "The quarterly numbers look great to me.",
                "problem": "Vague subject",
                "suggestion": "Name the metric",
                "corrected_sentence": "The quarterly revenue numbers look strong."
            }
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    let config = awkward_config();
    let engine = DocumentAnalyzer::new(config.clone())
        .unwrap()
        .with_enhancer(Arc::new(enhancer_for(&server, &config)));

    let report = engine
        .analyze("draft.txt", &format!("{SENTENCE}\n"))
        .await
        .unwrap();

    // The answer talked about some other sentence, so the pattern wording
    // stands.
    assert_eq!(report.summary.total_issues, 1);
    let finding = &report.issues[0];
    assert_eq!(finding.source, FindingSource::Pattern);
    assert!(finding.problem.starts_with("Awkward construction"));
}

#[tokio::test]
async fn test_zero_document_budget_never_calls_the_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(serde_json::json!([]))))
        .expect(0)
        .mount(&server)
        .await;

    let mut broke = awkward_config();
    broke.llm.ceilings.per_document_usd = 0.0;
    let with_llm = DocumentAnalyzer::new(broke.clone())
        .unwrap()
        .with_enhancer(Arc::new(enhancer_for(&server, &broke)));

    let mut pattern_config = awkward_config();
    pattern_config.llm.enabled = false;
    let pattern_only = DocumentAnalyzer::new(pattern_config).unwrap();

    let text = format!("{SENTENCE}\n");
    let degraded = with_llm.analyze("draft.txt", &text).await.unwrap();
    let baseline = pattern_only.analyze("draft.txt", &text).await.unwrap();

    // Degraded output matches a pattern-only run, plus a warning.
    assert_eq!(
        serde_json::to_value(&degraded.issues).unwrap(),
        serde_json::to_value(&baseline.issues).unwrap()
    );
    assert!(degraded.summary.warnings[0].contains("document budget"));
    assert!(baseline.summary.warnings.is_empty());
}

#[tokio::test]
async fn test_rate_limited_call_retries_then_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(serde_json::json!([
            {
                "id": 0,
                "original_text": SENTENCE,
                "problem": "Roundabout causal phrasing",
                "suggestion": "Use \"the reason is that\"",
                "corrected_sentence": "The reason is that we left early."
            }
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    let config = awkward_config();
    let enhancer = enhancer_for(&server, &config).with_retry(RetryPolicy {
        initial_delay: Duration::from_millis(10),
        multiplier: 2.0,
        max_delay: Duration::from_millis(50),
        max_attempts: 3,
    });
    let engine = DocumentAnalyzer::new(config)
        .unwrap()
        .with_enhancer(Arc::new(enhancer));

    let report = engine
        .analyze("draft.txt", &format!("{SENTENCE}\n"))
        .await
        .unwrap();

    assert_eq!(report.issues[0].source, FindingSource::Llm);
    assert!(report.summary.warnings.is_empty());
}

#[tokio::test]
async fn test_api_failure_degrades_to_pattern_findings() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .expect(1)
        .mount(&server)
        .await;

    let config = awkward_config();
    let engine = DocumentAnalyzer::new(config.clone())
        .unwrap()
        .with_enhancer(Arc::new(enhancer_for(&server, &config)));

    let report = engine
        .analyze("draft.txt", &format!("{SENTENCE}\n"))
        .await
        .unwrap();

    assert_eq!(report.summary.total_issues, 1);
    assert_eq!(report.issues[0].source, FindingSource::Pattern);
    assert!(report.summary.warnings[0].contains("enhancement call failed"));
}
