use std::collections::BTreeMap;
use std::path::Path;

use pcc_core::error::AppError;
use pcc_core::normalize::clean_text;

use crate::embeddings::Embedder;

pub mod chunking;
pub mod index;
pub mod model;
mod similarity;

pub use chunking::{chunk_text, ChunkConfig};
pub use index::{corpus_dir, corpus_dir_name, CorpusIndexMeta, VectorIndex};
pub use model::{ChunkMeta, EvidenceBundle, IndexEntry, SearchHit};

/// Normalize, chunk, and index one corpus from raw extracted text.
/// `source_url` is recorded on every chunk for policy corpora; regulation
/// corpora pass `None`.
pub fn build_corpus_index(
    embedder: &dyn Embedder,
    model: &str,
    corpus: &str,
    raw_text: &str,
    source_url: Option<&str>,
    cfg: &ChunkConfig,
    built_at: &str,
) -> Result<VectorIndex, AppError> {
    let cleaned = clean_text(raw_text);
    let chunks = chunk_text(&cleaned, cfg)?;
    let metas: Vec<ChunkMeta> = chunks
        .iter()
        .map(|_| ChunkMeta {
            corpus: corpus.to_string(),
            source_url: source_url.map(str::to_string),
        })
        .collect();
    VectorIndex::build(embedder, model, corpus, &chunks, &metas, built_at)
}

/// Build and persist one index per regulation (e.g. "GDPR", "CCPA") under
/// `base`, each in its own normalized directory. Rebuild replaces the
/// stored index wholesale; there is no incremental update.
pub fn build_and_save_regulation_indices(
    embedder: &dyn Embedder,
    model: &str,
    docs: &BTreeMap<String, String>,
    base: &Path,
    cfg: &ChunkConfig,
    built_at: &str,
) -> Result<IndexSet, AppError> {
    let mut set = IndexSet::new();
    for (name, full_text) in docs {
        let index = build_corpus_index(embedder, model, name, full_text, None, cfg, built_at)?;
        index.save(&corpus_dir(base, name))?;
        set.insert(index);
    }
    Ok(set)
}

/// Loaded or freshly built indices keyed by corpus name. Downstream code
/// never distinguishes the two origins.
#[derive(Debug, Clone, Default)]
pub struct IndexSet {
    indices: BTreeMap<String, VectorIndex>,
}

impl IndexSet {
    pub fn new() -> Self {
        Self {
            indices: BTreeMap::new(),
        }
    }

    /// Restore the named corpora from their directories under `base`.
    pub fn load(base: &Path, corpora: &[String]) -> Result<Self, AppError> {
        let mut set = Self::new();
        for corpus in corpora {
            set.insert(VectorIndex::load(&corpus_dir(base, corpus))?);
        }
        Ok(set)
    }

    /// Register an index under its corpus name, replacing any previous one.
    pub fn insert(&mut self, index: VectorIndex) {
        self.indices.insert(index.meta().corpus.clone(), index);
    }

    pub fn get(&self, corpus: &str) -> Result<&VectorIndex, AppError> {
        self.indices.get(corpus).ok_or_else(|| {
            AppError::new("CORPUS_NOT_FOUND", "No index for corpus")
                .with_details(format!("corpus={corpus}"))
        })
    }

    pub fn corpora(&self) -> Vec<&str> {
        self.indices.keys().map(|k| k.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
