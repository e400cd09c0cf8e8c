use std::collections::{BTreeMap, BTreeSet};

use pcc_core::criteria::CriteriaSet;
use pcc_core::error::AppError;

use crate::corpus::{EvidenceBundle, IndexSet};
use crate::embeddings::Embedder;

/// Fetch top-`k` matches for every query from every named corpus and merge
/// them into one evidence bundle per corpus.
///
/// One search is issued per (corpus, query) pair; within a corpus, results
/// are merged in rank order and exact-text duplicates are dropped keeping
/// the first-seen position. A corpus whose searches all come back empty
/// yields an empty bundle, not an error. Every corpus name is resolved
/// before the first embedding call, so an unknown corpus fails fast with
/// `CORPUS_NOT_FOUND`.
pub fn retrieve(
    set: &IndexSet,
    embedder: &dyn Embedder,
    queries: &[String],
    corpora: &[String],
    k: usize,
) -> Result<BTreeMap<String, EvidenceBundle>, AppError> {
    if queries.is_empty() {
        return Err(AppError::new(
            "VALIDATION_FAILED",
            "At least one retrieval query is required",
        ));
    }
    if k == 0 {
        return Err(AppError::new(
            "VALIDATION_FAILED",
            "Retrieval k must be at least 1",
        ));
    }
    for corpus in corpora {
        set.get(corpus)?;
    }

    let mut bundles: BTreeMap<String, EvidenceBundle> = BTreeMap::new();
    for corpus in corpora {
        let index = set.get(corpus)?;
        let mut bundle = EvidenceBundle::empty(corpus);
        let mut seen: BTreeSet<String> = BTreeSet::new();
        for query in queries {
            for hit in index.search(embedder, query, k)? {
                if seen.insert(hit.text.clone()) {
                    bundle.passages.push(hit.text);
                }
            }
        }
        bundles.insert(corpus.clone(), bundle);
    }
    Ok(bundles)
}

/// Criteria-driven retrieval: look up the checklist for `policy_type` and
/// use each criterion as a query against the given corpora.
pub fn retrieve_for_policy_type(
    set: &IndexSet,
    embedder: &dyn Embedder,
    criteria: &CriteriaSet,
    policy_type: &str,
    corpora: &[String],
    k: usize,
) -> Result<BTreeMap<String, EvidenceBundle>, AppError> {
    let queries = criteria.criteria_for(policy_type)?;
    retrieve(set, embedder, queries, corpora, k)
}
