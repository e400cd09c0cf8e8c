use pcc_core::error::AppError;

/// Language-reasoning backend boundary: one text request in, one text
/// response out. No streaming, no multi-turn state. Output is expected to
/// vary across identical inputs (temperature > 0); consumers parse it with
/// the verdict parser, which tolerates that.
pub trait Llm {
    fn generate(&self, model: &str, prompt: &str) -> Result<String, AppError>;
}

pub mod ollama_llm;

pub use ollama_llm::OllamaLlm;
