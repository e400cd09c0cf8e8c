use pcc_core::error::AppError;

/// Maps text to a fixed-length vector for a given model identity.
///
/// Deterministic for a fixed (model, input) pair. Vectors from different
/// models are not comparable; an index records the model it was built with
/// and queries must use the same one. The batch form exists for throughput
/// only and must be semantically identical to mapping the single form.
pub trait Embedder {
    fn embed(&self, model: &str, input: &str) -> Result<Vec<f32>, AppError>;

    fn embed_batch(&self, model: &str, inputs: &[String]) -> Result<Vec<Vec<f32>>, AppError> {
        inputs.iter().map(|text| self.embed(model, text)).collect()
    }
}

pub mod ollama_embed;

pub use ollama_embed::OllamaEmbedder;
