use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use pcc_ai::corpus::EvidenceBundle;
use pcc_ai::evaluate::{evaluate_compliance, summarize_policy, EvaluationRequest};
use pcc_ai::llm::Llm;
use pcc_ai::verdict::{parse_verdict, ComplianceStatus, VerdictOutcome};
use pcc_core::error::AppError;
use pretty_assertions::assert_eq;

struct RecordingLlm {
    out: String,
    prompts: Mutex<Vec<String>>,
}

impl RecordingLlm {
    fn new(out: &str) -> Self {
        Self {
            out: out.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn last_prompt(&self) -> String {
        self.prompts.lock().unwrap().last().cloned().expect("no prompt recorded")
    }
}

impl Llm for RecordingLlm {
    fn generate(&self, _model: &str, prompt: &str) -> Result<String, AppError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.out.clone())
    }
}

struct FailingLlm {
    calls: AtomicUsize,
}

impl Llm for FailingLlm {
    fn generate(&self, _model: &str, _prompt: &str) -> Result<String, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AppError::new("LLM_GENERATION_FAILED", "backend unreachable").with_retryable(true))
    }
}

fn bundle(corpus: &str, passages: &[&str]) -> EvidenceBundle {
    EvidenceBundle {
        corpus: corpus.to_string(),
        passages: passages.iter().map(|p| p.to_string()).collect(),
    }
}

fn request() -> EvaluationRequest {
    let mut regulation_evidence = BTreeMap::new();
    regulation_evidence.insert(
        "GDPR".to_string(),
        bundle("GDPR", &["Article 13 requires disclosure of processing."]),
    );
    regulation_evidence.insert(
        "CCPA".to_string(),
        bundle("CCPA", &["Consumers may opt out of the sale of data."]),
    );
    EvaluationRequest {
        policy_type: "Privacy Policy".to_string(),
        criteria: vec![
            "Is data collection disclosed?".to_string(),
            "Can users delete their data?".to_string(),
        ],
        policy_evidence: bundle("policy", &["We collect your email and name for marketing."]),
        regulation_evidence,
    }
}

#[test]
fn prompt_contains_evidence_regulations_and_numbered_criteria() {
    let llm = RecordingLlm::new("{}");
    evaluate_compliance(&llm, "mock-model", &request()).expect("evaluate");

    let prompt = llm.last_prompt();
    assert!(prompt.contains("We collect your email and name for marketing."));
    assert!(prompt.contains("GDPR reference excerpts:"));
    assert!(prompt.contains("Article 13 requires disclosure of processing."));
    assert!(prompt.contains("CCPA reference excerpts:"));
    assert!(prompt.contains("1. Is data collection disclosed?"));
    assert!(prompt.contains("2. Can users delete their data?"));
    assert!(prompt.contains("\"Privacy Policy\""));
}

#[test]
fn raw_output_round_trips_through_the_verdict_parser() {
    let canned = r#"{"overall_status":"Compliant","explanation":"Disclosure duties are met.","criteria":[{"question":"Is data collection disclosed?","status":"Yes","explanation":"Collection purposes are listed.","regulation":"GDPR Art. 13"}]}"#;
    let llm = RecordingLlm::new(canned);

    let raw = evaluate_compliance(&llm, "mock-model", &request()).expect("evaluate");
    match parse_verdict(&raw) {
        VerdictOutcome::Parsed(v) => {
            assert_eq!(v.overall_status, ComplianceStatus::Compliant);
            assert_eq!(v.criteria.len(), 1);
        }
        VerdictOutcome::Unparsed(f) => panic!("expected verdict, got raw: {}", f.raw),
    }
}

#[test]
fn backend_failure_propagates_without_retry() {
    let llm = FailingLlm {
        calls: AtomicUsize::new(0),
    };
    let err = evaluate_compliance(&llm, "mock-model", &request()).expect_err("should error");
    assert_eq!(err.code, "LLM_GENERATION_FAILED");
    assert!(err.retryable);
    assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn empty_criteria_fail_validation() {
    let mut req = request();
    req.criteria.clear();
    let llm = RecordingLlm::new("{}");
    let err = evaluate_compliance(&llm, "mock-model", &req).expect_err("should error");
    assert_eq!(err.code, "VALIDATION_FAILED");
}

#[test]
fn summarize_requires_evidence_and_asks_for_prose() {
    let llm = RecordingLlm::new("A readable summary.");

    let err = summarize_policy(&llm, "mock-model", &bundle("policy", &[]))
        .expect_err("empty evidence");
    assert_eq!(err.code, "VALIDATION_FAILED");

    let out = summarize_policy(
        &llm,
        "mock-model",
        &bundle("policy", &["We collect your email and name for marketing."]),
    )
    .expect("summarize");
    assert_eq!(out, "A readable summary.");

    let prompt = llm.last_prompt();
    assert!(prompt.contains("We collect your email and name for marketing."));
    assert!(prompt.contains("Do not return JSON"));
}
