use pcc_ai::verdict::{parse_verdict, ComplianceStatus, VerdictOutcome};
use pretty_assertions::assert_eq;

fn expect_parsed(raw: &str) -> pcc_ai::verdict::ComplianceVerdict {
    match parse_verdict(raw) {
        VerdictOutcome::Parsed(v) => v,
        VerdictOutcome::Unparsed(f) => panic!("expected verdict, got raw: {}", f.raw),
    }
}

#[test]
fn strict_json_sample_decodes_exactly() {
    let raw = r#"{"overall_status":"Compliant","explanation":"Disclosure duties are met.","criteria":[{"question":"Is data collection disclosed?","status":"Yes","explanation":"Collection purposes are listed in section 2.","regulation":"GDPR Art. 13"}]}"#;

    let v = expect_parsed(raw);
    assert_eq!(v.overall_status, ComplianceStatus::Compliant);
    assert_eq!(v.criteria.len(), 1);
    assert_eq!(v.criteria[0].question, "Is data collection disclosed?");
    assert_eq!(v.criteria[0].status, "Yes");
    assert_eq!(
        v.criteria[0].explanation,
        "Collection purposes are listed in section 2."
    );
    assert_eq!(v.criteria[0].regulation, "GDPR Art. 13");
}

#[test]
fn json_wrapped_in_commentary_is_still_decoded() {
    let raw = concat!(
        "Here is my assessment of the policy:\n\n",
        r#"{"overall_status":"Non-Compliant","explanation":"Retention terms are missing.","criteria":[]}"#,
        "\n\nLet me know if anything needs expanding."
    );

    let v = expect_parsed(raw);
    assert_eq!(v.overall_status, ComplianceStatus::NonCompliant);
    assert_eq!(v.explanation, "Retention terms are missing.");
}

#[test]
fn marker_fallback_builds_a_partial_verdict() {
    let raw = "Compliance Report\n\n\
               Summary of Findings:\n\
               The policy is Partially Compliant with GDPR and CCPA.\n\n\
               Potential Risks or Non-Compliance:\n\
               - No data retention period is stated\n\
               - Third-party sharing is Non-Compliant with GDPR Art. 13\n";

    let v = expect_parsed(raw);
    assert_eq!(v.overall_status, ComplianceStatus::PartiallyCompliant);
    assert_eq!(
        v.explanation,
        "The policy is Partially Compliant with GDPR and CCPA."
    );
    assert_eq!(v.criteria.len(), 2);
    assert_eq!(v.criteria[0].question, "No data retention period is stated");
    assert_eq!(v.criteria[0].status, "Unknown");
    assert_eq!(v.criteria[1].status, "Non-Compliant");
}

#[test]
fn plain_paragraph_returns_parse_failure_with_raw_preserved() {
    let raw = "  The weather is nice today and there is nothing legal about this paragraph.  ";
    match parse_verdict(raw) {
        VerdictOutcome::Unparsed(f) => assert_eq!(f.raw, raw),
        VerdictOutcome::Parsed(v) => panic!("unexpected verdict: {v:?}"),
    }
}

#[test]
fn status_vocabulary_without_section_markers_is_not_enough() {
    let raw = "Everything seems compliant overall, broadly speaking.";
    assert!(matches!(
        parse_verdict(raw),
        VerdictOutcome::Unparsed(_)
    ));
}

#[test]
fn status_serde_names_match_prompt_vocabulary() {
    assert_eq!(
        serde_json::to_string(&ComplianceStatus::PartiallyCompliant).unwrap(),
        r#""Partially Compliant""#
    );
    assert_eq!(
        serde_json::to_string(&ComplianceStatus::NonCompliant).unwrap(),
        r#""Non-Compliant""#
    );
}
