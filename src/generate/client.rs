// OpenAI-compatible chat completions client.
//
// OpenAI and Ollama both speak the same `/chat/completions` protocol, so one
// client covers both: only the base URL, key, and model differ. Each request
// is a single user message; the first choice's message content is the reply.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::traits::{GenerationRequest, TextGenerator};
use crate::config::Config;
use crate::output::truncate_chars;

/// Local models can take a while on long transcripts.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(180);

/// Chat completions client for one provider/model pair.
pub struct ChatCompletionsClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ChatCompletionsClient {
    /// Create a client pointing at an OpenAI-compatible API base
    /// (e.g. `https://api.openai.com/v1` or `http://localhost:11434/v1`).
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent("postcraft/0.1")
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    /// Create a client for whichever provider the configuration selected.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.require_provider()?;
        Self::new(&config.api_base_url(), config.api_key(), config.model())
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for ChatCompletionsClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        info!(
            model = %self.model,
            prompt_chars = request.prompt.chars().count(),
            "Calling chat completions"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Failed to call {url}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Chat completions returned {}: {}", status, body);
        }

        let result: ChatResponse = response
            .json()
            .await
            .context("Failed to parse chat completions response")?;

        let reply = result
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| anyhow::anyhow!("Chat completions response had no message content"))?;

        debug!(
            model = %self.model,
            reply_preview = %truncate_chars(&reply, 80),
            "Received reply"
        );

        Ok(reply)
    }
}

// --- Chat completions request/response types ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
}

#[derive(Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Deserialize)]
pub struct ChoiceMessage {
    /// Null when the model answered with tool calls only.
    pub content: Option<String>,
}
