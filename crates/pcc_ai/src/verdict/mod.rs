use serde::{Deserialize, Serialize};
use std::fmt;

mod fallback;

/// Overall evaluation outcome. Serde names match the strings the
/// evaluation prompt instructs the model to emit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ComplianceStatus {
    #[serde(rename = "Compliant")]
    Compliant,
    #[serde(rename = "Partially Compliant")]
    PartiallyCompliant,
    #[serde(rename = "Non-Compliant")]
    NonCompliant,
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ComplianceStatus::Compliant => "Compliant",
            ComplianceStatus::PartiallyCompliant => "Partially Compliant",
            ComplianceStatus::NonCompliant => "Non-Compliant",
        };
        f.write_str(s)
    }
}

/// One checklist entry of the verdict. `status` is free text ("Yes",
/// "Partially Compliant", ...) since per-criterion phrasing varies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CriterionFinding {
    pub question: String,
    pub status: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub regulation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComplianceVerdict {
    pub overall_status: ComplianceStatus,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub criteria: Vec<CriterionFinding>,
}

/// Model output that no strategy could decode. Carries the output
/// byte-for-byte so nothing is lost for user inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub raw: String,
}

/// Result of parsing model output: either a verdict (possibly partial,
/// from the degraded fallback) or the preserved raw text. Callers branch
/// on this; parsing never raises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerdictOutcome {
    Parsed(ComplianceVerdict),
    Unparsed(ParseFailure),
}

impl VerdictOutcome {
    pub fn verdict(&self) -> Option<&ComplianceVerdict> {
        match self {
            VerdictOutcome::Parsed(v) => Some(v),
            VerdictOutcome::Unparsed(_) => None,
        }
    }

    pub fn raw(&self) -> Option<&str> {
        match self {
            VerdictOutcome::Parsed(_) => None,
            VerdictOutcome::Unparsed(f) => Some(&f.raw),
        }
    }
}

/// Decode model output into a `ComplianceVerdict`, trying strategies in
/// order of strictness:
///
/// 1. the whole trimmed text as JSON;
/// 2. the substring from the first `{` to the last `}` as JSON (models
///    often wrap the object in commentary);
/// 3. best-effort extraction from known section markers (degraded mode,
///    see `fallback`);
/// 4. otherwise the raw text is handed back unmodified.
pub fn parse_verdict(raw: &str) -> VerdictOutcome {
    let trimmed = raw.trim();
    if let Ok(v) = serde_json::from_str::<ComplianceVerdict>(trimmed) {
        return VerdictOutcome::Parsed(v);
    }
    if let Some(v) = embedded_json(trimmed) {
        return VerdictOutcome::Parsed(v);
    }
    if let Some(v) = fallback::extract(raw) {
        log::warn!("structured verdict decode failed; used marker fallback");
        return VerdictOutcome::Parsed(v);
    }
    log::warn!("verdict output not decodable; returning raw text");
    VerdictOutcome::Unparsed(ParseFailure {
        raw: raw.to_string(),
    })
}

fn embedded_json(text: &str) -> Option<ComplianceVerdict> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}
