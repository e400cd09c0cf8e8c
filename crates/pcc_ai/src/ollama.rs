use pcc_core::error::AppError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:11434";

/// Shared HTTP endpoint handle for the Ollama embeddings and generation
/// backends. Holds no connection state; each call is a fresh blocking
/// request with its own timeout.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    base_url: String,
}

impl OllamaClient {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let base_url = base_url.trim_end_matches('/').to_string();

        let rest = base_url
            .strip_prefix("http://")
            .or_else(|| base_url.strip_prefix("https://"))
            .unwrap_or("");
        if rest.is_empty() {
            return Err(AppError::new(
                "BASE_URL_INVALID",
                "Backend base URL must be http(s)://host[:port]",
            )
            .with_details(format!("base_url={base_url}")));
        }
        // The path is appended per endpoint; a base URL carrying one would
        // silently double it.
        if rest.contains('/') {
            return Err(AppError::new(
                "BASE_URL_INVALID",
                "Backend base URL must not contain a path",
            )
            .with_details(format!("base_url={base_url}")));
        }

        Ok(Self { base_url })
    }

    /// Client for the default local endpoint.
    pub fn localhost() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn health_check(&self) -> Result<(), AppError> {
        let url = format!("{}/api/tags", self.base_url);
        let resp = ureq::get(&url)
            .timeout(std::time::Duration::from_millis(800))
            .call();

        match resp {
            Ok(r) if r.status() == 200 => Ok(()),
            Ok(r) => Err(
                AppError::new("OLLAMA_UNHEALTHY", "Ollama health check failed")
                    .with_details(format!("status={}", r.status())),
            ),
            Err(e) => Err(AppError::new(
                "OLLAMA_UNREACHABLE",
                "Failed to reach the Ollama backend",
            )
            .with_details(e.to_string())
            .with_retryable(true)),
        }
    }
}
