use serde::{Deserialize, Serialize};

/// Per-chunk metadata carried through the index. Policy corpora record the
/// scraped page URL; regulation corpora carry only the corpus name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkMeta {
    pub corpus: String,
    pub source_url: Option<String>,
}

/// One stored index entry minus its vector (vectors are persisted in a
/// parallel file). `text_sha256` is re-checked on load to catch tampered
/// or truncated chunk files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexEntry {
    pub text: String,
    pub text_sha256: String,
    pub meta: ChunkMeta,
}

/// A single retrieval result: the chunk text, its metadata, and the cosine
/// similarity against the query (higher is closer).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    pub text: String,
    pub meta: ChunkMeta,
    pub score: f32,
}

/// Rank-ordered, deduplicated chunk texts retrieved from one corpus for a
/// query set. May legitimately be empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvidenceBundle {
    pub corpus: String,
    pub passages: Vec<String>,
}

impl EvidenceBundle {
    pub fn empty(corpus: &str) -> Self {
        Self {
            corpus: corpus.to_string(),
            passages: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Evidence text as fed to the evaluation prompt: passages separated
    /// by blank lines, rank order preserved.
    pub fn joined(&self) -> String {
        self.passages.join("\n\n")
    }
}
