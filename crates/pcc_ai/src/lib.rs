pub mod corpus;
pub mod embeddings;
pub mod evaluate;
pub mod llm;
pub mod ollama;
pub mod retrieve;
pub mod verdict;

#[cfg(test)]
mod tests {
    use super::ollama::OllamaClient;

    #[test]
    fn validates_backend_base_url_shape() {
        assert!(OllamaClient::new("http://127.0.0.1:11434").is_ok());
        assert!(OllamaClient::new("https://inference.internal:8080").is_ok());
        assert!(OllamaClient::new("http://127.0.0.1:11434/").is_ok()); // trailing slash is trimmed

        assert!(OllamaClient::new("").is_err());
        assert!(OllamaClient::new("127.0.0.1:11434").is_err());
        assert!(OllamaClient::new("http://").is_err());
        assert!(OllamaClient::new("ftp://127.0.0.1:11434").is_err());
        assert!(OllamaClient::new("http://127.0.0.1:11434/api").is_err());

        assert_eq!(
            OllamaClient::localhost().base_url(),
            "http://127.0.0.1:11434"
        );
    }
}
