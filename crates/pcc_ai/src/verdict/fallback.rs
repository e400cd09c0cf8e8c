//! Degraded-mode verdict extraction from free-text model output.
//!
//! Inherently fragile: it keys off the section headers the evaluation
//! prompt asks for and the status vocabulary. Kept behind `parse_verdict`
//! so it can be strengthened or swapped without touching callers.

use super::{ComplianceStatus, ComplianceVerdict, CriterionFinding};

/// Section headers recognized in free-text reports.
const SECTION_MARKERS: [&str; 6] = [
    "Summary of Findings",
    "Overall Status",
    "Detailed Section-wise Assessment",
    "Potential Risks or Non-Compliance",
    "Recommended Actions",
    "Descriptive Natural Language Summary",
];

/// Build a partial verdict from marker-delimited substrings. Returns
/// `None` (parse failure upstream) unless at least one known section
/// marker is present and an overall status phrase is detectable.
pub(super) fn extract(raw: &str) -> Option<ComplianceVerdict> {
    if !SECTION_MARKERS.iter().any(|m| find_ci(raw, m).is_some()) {
        return None;
    }
    let overall_status = detect_status(raw)?;

    let explanation = section_body(raw, "Summary of Findings")
        .or_else(|| section_body(raw, "Descriptive Natural Language Summary"))
        .or_else(|| section_body(raw, "Overall Status"))
        .unwrap_or_default();

    let mut criteria = Vec::new();
    for marker in [
        "Detailed Section-wise Assessment",
        "Potential Risks or Non-Compliance",
    ] {
        if let Some(block) = section_body(raw, marker) {
            criteria.extend(bullet_findings(&block));
        }
    }

    Some(ComplianceVerdict {
        overall_status,
        explanation,
        criteria,
    })
}

/// Classify the first "compliant" mention by its immediate prefix.
/// "Non-Compliance" headers do not trigger this (compliance != compliant).
fn detect_status(text: &str) -> Option<ComplianceStatus> {
    let lower = text.to_ascii_lowercase();
    let pos = lower.find("compliant")?;
    let prefix = &lower[..pos];
    if prefix.ends_with("non-") || prefix.ends_with("non ") {
        return Some(ComplianceStatus::NonCompliant);
    }
    if prefix.ends_with("partially ") {
        return Some(ComplianceStatus::PartiallyCompliant);
    }
    Some(ComplianceStatus::Compliant)
}

/// The text between `marker` and the next known marker (or the end),
/// with header punctuation and markdown residue trimmed.
fn section_body(raw: &str, marker: &str) -> Option<String> {
    let start = find_ci(raw, marker)? + marker.len();
    let rest = &raw[start..];
    let rest =
        rest.trim_start_matches(|c: char| c == ':' || c == '*' || c == '#' || c.is_whitespace());

    let mut end = rest.len();
    for m in SECTION_MARKERS {
        if m.eq_ignore_ascii_case(marker) {
            continue;
        }
        if let Some(p) = find_ci(rest, m) {
            end = end.min(p);
        }
    }
    let body = rest[..end]
        .trim_end_matches(|c: char| c == '*' || c == '#' || c.is_whitespace())
        .trim();
    if body.is_empty() {
        None
    } else {
        Some(body.to_string())
    }
}

/// Bulleted or numbered lines become per-criterion findings. Inline status
/// phrases are lifted into the finding's status; everything else is
/// "Unknown" since degraded mode has no reliable structure to mine.
fn bullet_findings(block: &str) -> Vec<CriterionFinding> {
    let mut out = Vec::new();
    for line in block.lines() {
        let t = line.trim();
        let stripped = t
            .strip_prefix("- ")
            .or_else(|| t.strip_prefix("* "))
            .or_else(|| strip_numbered(t));
        let Some(question) = stripped else { continue };
        let question = question.trim();
        if question.is_empty() {
            continue;
        }
        let status = detect_status(question)
            .map(|s| s.to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        out.push(CriterionFinding {
            question: question.to_string(),
            status,
            explanation: String::new(),
            regulation: String::new(),
        });
    }
    out
}

fn strip_numbered(t: &str) -> Option<&str> {
    let rest = t.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() == t.len() {
        return None;
    }
    rest.strip_prefix(". ").or_else(|| rest.strip_prefix(") "))
}

/// ASCII case-insensitive substring search. Returned offsets are byte
/// positions and always char boundaries because the needles are ASCII.
fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() || h.len() < n.len() {
        return None;
    }
    (0..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}
