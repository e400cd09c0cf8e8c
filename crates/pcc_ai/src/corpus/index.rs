use std::fs;
use std::path::{Path, PathBuf};

use pcc_core::error::AppError;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::model::{ChunkMeta, IndexEntry, SearchHit};
use super::similarity;
use crate::embeddings::Embedder;

const META_FILE: &str = "index_meta.json";
const VECTORS_FILE: &str = "index_vectors.json";
const CHUNKS_FILE: &str = "index_chunks.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CorpusIndexMeta {
    pub corpus: String,
    /// Embedding model identity the index was built with. Recorded for the
    /// operator; loading with a different model is NOT detected (vectors do
    /// not self-describe their origin) and silently degrades search.
    pub model: String,
    pub dims: u32,
    pub entry_count: u32,
    /// RFC3339, caller-supplied.
    pub built_at: String,
}

/// Immutable per-corpus similarity index: parallel vectors and entries.
/// Built once (or loaded) and only read afterwards; `search` takes `&self`
/// and no interior mutation exists, so concurrent reads need no locking.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    meta: CorpusIndexMeta,
    vectors: Vec<Vec<f32>>,
    entries: Vec<IndexEntry>,
}

impl VectorIndex {
    /// Embed every chunk and assemble the index. `chunks` and `metas` are
    /// parallel sequences; mismatched lengths or an empty corpus are
    /// rejected before any embedding call.
    pub fn build(
        embedder: &dyn Embedder,
        model: &str,
        corpus: &str,
        chunks: &[String],
        metas: &[ChunkMeta],
        built_at: &str,
    ) -> Result<Self, AppError> {
        if chunks.len() != metas.len() {
            return Err(AppError::new(
                "VALIDATION_FAILED",
                "Chunk and metadata sequences must have equal length",
            )
            .with_details(format!("chunks={}; metas={}", chunks.len(), metas.len())));
        }
        if chunks.is_empty() {
            return Err(AppError::new(
                "VALIDATION_FAILED",
                "Cannot build an index from zero chunks",
            )
            .with_details(format!("corpus={corpus}")));
        }

        let vectors = embedder.embed_batch(model, chunks)?;
        let mut dims: Option<u32> = None;
        for (i, v) in vectors.iter().enumerate() {
            let this_dims = v.len() as u32;
            if this_dims == 0 {
                return Err(AppError::new(
                    "EMBEDDINGS_FAILED",
                    "Embedding provider returned an empty vector",
                )
                .with_details(format!("corpus={corpus}; chunk={i}")));
            }
            match dims {
                Some(d) if d != this_dims => {
                    return Err(AppError::new(
                        "EMBEDDINGS_FAILED",
                        "Embedding dimension mismatch across chunks",
                    )
                    .with_details(format!("expected={d}; got={this_dims}; chunk={i}")));
                }
                Some(_) => {}
                None => dims = Some(this_dims),
            }
        }

        let entries = chunks
            .iter()
            .zip(metas.iter())
            .map(|(text, meta)| IndexEntry {
                text: text.clone(),
                text_sha256: sha256_hex(text.as_bytes()),
                meta: meta.clone(),
            })
            .collect::<Vec<_>>();

        log::info!(
            "built corpus index corpus={} entries={} dims={}",
            corpus,
            entries.len(),
            dims.unwrap_or(0)
        );

        Ok(Self {
            meta: CorpusIndexMeta {
                corpus: corpus.to_string(),
                model: model.to_string(),
                dims: dims.unwrap_or(0),
                entry_count: entries.len() as u32,
                built_at: built_at.to_string(),
            },
            vectors,
            entries,
        })
    }

    pub fn meta(&self) -> &CorpusIndexMeta {
        &self.meta
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Embed `query` with the index's own model and return up to `k` hits
    /// by descending cosine similarity. Ties keep insertion order. An index
    /// holding fewer than `k` entries returns all of them.
    pub fn search(
        &self,
        embedder: &dyn Embedder,
        query: &str,
        k: usize,
    ) -> Result<Vec<SearchHit>, AppError> {
        if k == 0 {
            return Err(AppError::new(
                "VALIDATION_FAILED",
                "Search k must be at least 1",
            ));
        }
        let q = query.trim();
        if q.is_empty() {
            return Err(AppError::new(
                "VALIDATION_FAILED",
                "Search query must not be empty",
            ));
        }

        let qv = embedder.embed(&self.meta.model, q)?;
        if qv.len() as u32 != self.meta.dims {
            return Err(AppError::new(
                "RETRIEVAL_FAILED",
                "Query embedding dims do not match index dims",
            )
            .with_details(format!(
                "index_dims={}; query_dims={}",
                self.meta.dims,
                qv.len()
            )));
        }
        let qnorm = similarity::l2_norm(&qv);
        if qnorm == 0.0 {
            return Err(AppError::new(
                "RETRIEVAL_FAILED",
                "Query embedding norm is zero",
            ));
        }

        let mut scored: Vec<(usize, f32)> = Vec::new();
        for (i, v) in self.vectors.iter().enumerate() {
            let vnorm = similarity::l2_norm(v);
            if vnorm == 0.0 {
                continue;
            }
            scored.push((i, similarity::cosine(&qv, v, qnorm, vnorm)));
        }
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        scored.truncate(k);

        Ok(scored
            .into_iter()
            .map(|(i, score)| SearchHit {
                text: self.entries[i].text.clone(),
                meta: self.entries[i].meta.clone(),
                score,
            })
            .collect())
    }

    /// Persist the index wholesale into `dir`. Each file is written to a
    /// `.tmp` sibling and atomically renamed, so a crash mid-save leaves
    /// either the old index or the new one, never a torn mix of one file.
    pub fn save(&self, dir: &Path) -> Result<(), AppError> {
        fs::create_dir_all(dir).map_err(|e| {
            AppError::new("INDEX_STORAGE_FAILED", "Failed to create index directory")
                .with_details(format!("path={}; err={}", dir.display(), e))
        })?;
        write_json_atomic(&dir.join(VECTORS_FILE), &self.vectors)?;
        write_json_atomic(&dir.join(CHUNKS_FILE), &self.entries)?;
        write_json_atomic(&dir.join(META_FILE), &self.meta)?;
        log::info!(
            "saved corpus index corpus={} path={}",
            self.meta.corpus,
            dir.display()
        );
        Ok(())
    }

    /// Restore an index persisted by `save`. Round trip is exact: the
    /// loaded index returns identical `search` results for any query.
    pub fn load(dir: &Path) -> Result<Self, AppError> {
        let meta_path = dir.join(META_FILE);
        if !meta_path.exists() {
            return Err(AppError::new("INDEX_NOT_FOUND", "Corpus index not found")
                .with_details(format!("path={}", dir.display())));
        }
        let meta: CorpusIndexMeta = read_json(&meta_path)?;
        let vectors: Vec<Vec<f32>> = read_json(&dir.join(VECTORS_FILE))?;
        let entries: Vec<IndexEntry> = read_json(&dir.join(CHUNKS_FILE))?;

        if vectors.len() != entries.len() || entries.len() as u32 != meta.entry_count {
            return Err(AppError::new("INDEX_CORRUPT", "Corpus index files disagree")
                .with_details(format!(
                    "path={}; vectors={}; chunks={}; meta_count={}",
                    dir.display(),
                    vectors.len(),
                    entries.len(),
                    meta.entry_count
                )));
        }
        for (i, v) in vectors.iter().enumerate() {
            if v.len() as u32 != meta.dims {
                return Err(AppError::new("INDEX_CORRUPT", "Corpus index vector dims mismatch")
                    .with_details(format!(
                        "path={}; entry={}; expected={}; got={}",
                        dir.display(),
                        i,
                        meta.dims,
                        v.len()
                    )));
            }
        }
        for (i, entry) in entries.iter().enumerate() {
            if sha256_hex(entry.text.as_bytes()) != entry.text_sha256 {
                return Err(AppError::new("INDEX_CORRUPT", "Corpus chunk digest mismatch")
                    .with_details(format!("path={}; entry={}", dir.display(), i)));
            }
        }

        log::info!(
            "loaded corpus index corpus={} entries={} path={}",
            meta.corpus,
            entries.len(),
            dir.display()
        );

        Ok(Self {
            meta,
            vectors,
            entries,
        })
    }
}

/// Directory name for a corpus under the index base path: lower-cased,
/// spaces replaced with underscores ("Privacy Policy" -> "privacy_policy").
pub fn corpus_dir_name(corpus: &str) -> String {
    corpus.to_lowercase().replace(' ', "_")
}

pub fn corpus_dir(base: &Path, corpus: &str) -> PathBuf {
    base.join(corpus_dir_name(corpus))
}

fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
    let tmp = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(value).map_err(|e| {
        AppError::new("INDEX_STORAGE_FAILED", "Failed to encode index file")
            .with_details(format!("path={}; err={}", path.display(), e))
    })?;
    fs::write(&tmp, json.as_bytes()).map_err(|e| {
        AppError::new("INDEX_STORAGE_FAILED", "Failed to write index file")
            .with_details(format!("path={}; err={}", tmp.display(), e))
    })?;
    fs::rename(&tmp, path).map_err(|e| {
        AppError::new("INDEX_STORAGE_FAILED", "Failed to finalize index file write")
            .with_details(format!(
                "tmp={}; dest={}; err={}",
                tmp.display(),
                path.display(),
                e
            ))
    })?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let bytes = fs::read(path).map_err(|e| {
        AppError::new("INDEX_STORAGE_FAILED", "Failed to read index file")
            .with_details(format!("path={}; err={}", path.display(), e))
    })?;
    serde_json::from_slice(&bytes).map_err(|e| {
        AppError::new("INDEX_CORRUPT", "Failed to decode index file")
            .with_details(format!("path={}; err={}", path.display(), e))
    })
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    hex::encode(digest)
}
