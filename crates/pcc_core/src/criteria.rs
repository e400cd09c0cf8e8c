use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Named checklist table: policy-type name -> ordered criteria questions.
///
/// The same questions drive retrieval (as similarity queries) and the
/// evaluation prompt (as the enumerated checklist), so ordering is part of
/// the contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CriteriaSet {
    map: BTreeMap<String, Vec<String>>,
}

impl CriteriaSet {
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// The built-in checklist for the three supported document types.
    pub fn builtin() -> Self {
        let mut set = Self::new();
        set.insert(
            "Privacy Policy",
            &[
                "How is personal data collected?",
                "What third-party services are used?",
                "What personal information is shared with others?",
                "User consent mechanism and cookies?",
                "How can a user delete their data?",
                "How is user tracking handled?",
            ],
        );
        set.insert(
            "Terms of Use",
            &[
                "Liability disclaimers and limitations",
                "Data ownership clauses",
                "Jurisdiction and dispute resolution",
                "Account and password responsibility",
            ],
        );
        set.insert(
            "Cookie Policy",
            &[
                "Types of cookies used",
                "Purpose of cookies",
                "Cookie control and settings",
                "Consent for tracking cookies",
            ],
        );
        set
    }

    /// Load an externally supplied criteria table from its JSON form:
    /// an object mapping policy-type names to arrays of question strings.
    pub fn from_json_str(raw: &str) -> Result<Self, AppError> {
        let map: BTreeMap<String, Vec<String>> = serde_json::from_str(raw).map_err(|e| {
            AppError::new("CRITERIA_DECODE_FAILED", "Failed to decode criteria table")
                .with_details(e.to_string())
        })?;
        Ok(Self { map })
    }

    pub fn insert(&mut self, policy_type: &str, criteria: &[&str]) {
        self.map.insert(
            policy_type.to_string(),
            criteria.iter().map(|c| c.to_string()).collect(),
        );
    }

    pub fn criteria_for(&self, policy_type: &str) -> Result<&[String], AppError> {
        self.map
            .get(policy_type)
            .map(|v| v.as_slice())
            .ok_or_else(|| {
                AppError::new("CRITERIA_NOT_FOUND", "Unknown policy type")
                    .with_details(format!("policy_type={policy_type}"))
            })
    }

    pub fn policy_types(&self) -> Vec<&str> {
        self.map.keys().map(|k| k.as_str()).collect()
    }
}

impl Default for CriteriaSet {
    fn default() -> Self {
        Self::builtin()
    }
}
