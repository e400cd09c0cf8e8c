use std::collections::BTreeMap;

use pcc_core::error::AppError;
use pcc_core::normalize::truncate_words;

use crate::corpus::EvidenceBundle;
use crate::llm::Llm;

mod prompts;

/// Word cap applied to each evidence block before prompt assembly, so a
/// large retrieval cannot blow the backend's context window.
const MAX_EVIDENCE_WORDS: usize = 3000;

/// Everything one compliance evaluation needs: the retrieved policy
/// evidence, one evidence bundle per regulation, and the criteria
/// checklist for the policy type under review.
#[derive(Debug, Clone)]
pub struct EvaluationRequest {
    pub policy_type: String,
    pub criteria: Vec<String>,
    pub policy_evidence: EvidenceBundle,
    pub regulation_evidence: BTreeMap<String, EvidenceBundle>,
}

/// Assemble the evaluation prompt and issue exactly one backend call,
/// returning the raw model text. Retry and timeout policy beyond the
/// transport timeout belong to the caller; this function has no side
/// effect on stored indices, so an expired or failed call is safe to
/// re-issue.
pub fn evaluate_compliance(
    llm: &dyn Llm,
    model: &str,
    req: &EvaluationRequest,
) -> Result<String, AppError> {
    if req.criteria.is_empty() {
        return Err(AppError::new(
            "VALIDATION_FAILED",
            "Evaluation requires at least one criterion",
        ));
    }

    let policy_text = truncate_words(&req.policy_evidence.joined(), MAX_EVIDENCE_WORDS);
    let regulation_blocks = req
        .regulation_evidence
        .iter()
        .map(|(name, bundle)| {
            format!(
                "{name} reference excerpts:\n{}",
                truncate_words(&bundle.joined(), MAX_EVIDENCE_WORDS)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    let criteria_lines = req
        .criteria
        .iter()
        .enumerate()
        .map(|(i, q)| format!("{}. {q}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    let prompt = prompts::compliance_prompt(
        &req.policy_type,
        &policy_text,
        &regulation_blocks,
        &criteria_lines,
    );
    llm.generate(model, &prompt)
}

/// Natural-language policy summary over retrieved policy evidence.
pub fn summarize_policy(
    llm: &dyn Llm,
    model: &str,
    evidence: &EvidenceBundle,
) -> Result<String, AppError> {
    if evidence.is_empty() {
        return Err(AppError::new(
            "VALIDATION_FAILED",
            "Summarization requires retrieved policy evidence",
        ));
    }
    let prompt = prompts::summary_prompt(&truncate_words(&evidence.joined(), MAX_EVIDENCE_WORDS));
    llm.generate(model, &prompt)
}
