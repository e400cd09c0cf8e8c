pub fn compliance_prompt(
    policy_type: &str,
    policy_evidence: &str,
    regulation_blocks: &str,
    criteria_lines: &str,
) -> String {
    // The JSON shape named here is the strict-decoding contract of the
    // verdict parser; keep the two in sync.
    format!(
        r#"You are a senior legal compliance auditor with expertise in data privacy laws such as GDPR and CCPA.

Evaluate whether the website's "{policy_type}" document complies with the regulation excerpts provided below. Base every judgement only on the texts provided; do not rely on outside knowledge of the regulations.

Website policy excerpts:
{policy_evidence}

{regulation_blocks}

Evaluation criteria:
{criteria_lines}

Output (non-negotiable):
Return a single JSON object and nothing else, with this shape:
{{
  "overall_status": "Compliant" | "Partially Compliant" | "Non-Compliant",
  "explanation": "<short executive summary of the findings>",
  "criteria": [
    {{
      "question": "<criterion>",
      "status": "<assessment for this criterion>",
      "explanation": "<justification quoting the policy text>",
      "regulation": "<regulation clause relied on, e.g. GDPR Art. 13>"
    }}
  ]
}}
Answer every criterion, in order. If the policy is silent on a criterion, say so in its explanation. Do not invent regulation clauses.
"#
    )
}

pub fn summary_prompt(policy_evidence: &str) -> String {
    format!(
        r#"You are a legal language expert and policy summarization assistant.

Given the policy text below, write a professional, easy-to-read summary with these sections:

1. Overview - what the policy is about.
2. Data Collection - what user data is collected and how.
3. User Rights - access, correction, deletion, and similar rights.
4. Consent & Preferences - how user consent is taken and managed.
5. Third-party Sharing - data shared with other entities.
6. Data Retention & Security - how long data is kept and how it is protected.
7. Risks or Compliance Issues - inconsistencies or likely non-compliance with regulations such as GDPR or CCPA, as bullet points.

Keep it in clear, natural language. Do not return JSON or structured data. Avoid repetition; the audience is compliance and legal reviewers.

Policy text:
{policy_evidence}
"#
    )
}
