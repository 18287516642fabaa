// Text generator trait: the seam between prompts and model providers.
//
// Everything upstream of extraction talks to a model through this trait. The
// OpenAI-compatible client implements it for both OpenAI and Ollama; tests
// substitute an in-memory fake.

use anyhow::Result;
use async_trait::async_trait;

/// One prompt plus the sampling settings to send it with.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Trait for turning a prompt into text. Implementations must be async
/// because every real provider is an HTTP API.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a single reply for the request.
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}
