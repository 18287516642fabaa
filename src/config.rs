use std::env;

use anyhow::Result;

/// Default OpenAI endpoint (chat completions live under it).
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
/// Default local Ollama host. Its OpenAI-compatible API is under `/v1`.
pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Which model provider to send generation requests to.
#[derive(Debug, Clone, PartialEq)]
pub enum Provider {
    /// Hosted OpenAI, used whenever OPENAI_API_KEY is set
    OpenAi,
    /// Local Ollama through its OpenAI-compatible API, no key needed
    Ollama,
}

impl Provider {
    pub fn label(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Ollama => "ollama",
        }
    }
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy, so everything here can
/// also come from there.
pub struct Config {
    pub provider: Provider,
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_base_url: String,
    pub ollama_model: String,
    /// Ollama host without the `/v1` suffix (e.g. http://localhost:11434)
    pub ollama_base_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from any variable source.
    ///
    /// The provider is auto-detected from OPENAI_API_KEY unless
    /// POSTCRAFT_PROVIDER forces one.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let openai_api_key = var("OPENAI_API_KEY").unwrap_or_default().trim().to_string();

        let provider = match var("POSTCRAFT_PROVIDER").as_deref().map(str::trim) {
            Some("openai") => Provider::OpenAi,
            Some("ollama") => Provider::Ollama,
            Some("") | Some("auto") | None => {
                if openai_api_key.is_empty() {
                    Provider::Ollama
                } else {
                    Provider::OpenAi
                }
            }
            Some(other) => anyhow::bail!(
                "Unknown POSTCRAFT_PROVIDER '{other}'. Use 'openai', 'ollama', or leave it unset."
            ),
        };

        Ok(Self {
            provider,
            openai_api_key,
            openai_model: var("OPENAI_MODEL").unwrap_or_else(|| "gpt-4o".to_string()),
            openai_base_url: var("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            ollama_model: var("OLLAMA_MODEL").unwrap_or_else(|| "llama3.1:8b".to_string()),
            ollama_base_url: var("OLLAMA_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OLLAMA_BASE_URL.to_string()),
        })
    }

    /// Model name for the active provider.
    pub fn model(&self) -> &str {
        match self.provider {
            Provider::OpenAi => &self.openai_model,
            Provider::Ollama => &self.ollama_model,
        }
    }

    /// OpenAI-compatible API base for the active provider.
    pub fn api_base_url(&self) -> String {
        match self.provider {
            Provider::OpenAi => self.openai_base_url.trim_end_matches('/').to_string(),
            Provider::Ollama => format!("{}/v1", self.ollama_base_url.trim_end_matches('/')),
        }
    }

    /// Bearer token for the active provider. Ollama ignores it but the
    /// OpenAI-compatible API still expects one.
    pub fn api_key(&self) -> &str {
        match self.provider {
            Provider::OpenAi => &self.openai_api_key,
            Provider::Ollama => "ollama",
        }
    }

    /// Check that the active provider has what it needs.
    /// Call this before any operation that talks to a model.
    pub fn require_provider(&self) -> Result<()> {
        if self.provider == Provider::OpenAi && self.openai_api_key.is_empty() {
            anyhow::bail!(
                "POSTCRAFT_PROVIDER=openai but OPENAI_API_KEY is not set.\n\
                 Add it to your .env file, or unset POSTCRAFT_PROVIDER to use Ollama."
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_to_ollama_without_key() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.provider, Provider::Ollama);
        assert_eq!(config.model(), "llama3.1:8b");
        assert_eq!(config.api_base_url(), "http://localhost:11434/v1");
        assert!(config.require_provider().is_ok());
    }

    #[test]
    fn test_key_selects_openai() {
        let config = config_from(&[("OPENAI_API_KEY", " sk-test ")]).unwrap();
        assert_eq!(config.provider, Provider::OpenAi);
        assert_eq!(config.api_key(), "sk-test");
        assert_eq!(config.model(), "gpt-4o");
        assert_eq!(config.api_base_url(), "https://api.openai.com/v1");
    }

    #[test]
    fn test_blank_key_treated_as_missing() {
        let config = config_from(&[("OPENAI_API_KEY", "   ")]).unwrap();
        assert_eq!(config.provider, Provider::Ollama);
    }

    #[test]
    fn test_forced_openai_without_key_fails_requirement() {
        let config = config_from(&[("POSTCRAFT_PROVIDER", "openai")]).unwrap();
        assert!(config.require_provider().is_err());
    }

    #[test]
    fn test_unknown_provider_rejected() {
        assert!(config_from(&[("POSTCRAFT_PROVIDER", "bard")]).is_err());
    }

    #[test]
    fn test_ollama_url_trailing_slash() {
        let config = config_from(&[("OLLAMA_BASE_URL", "http://gpu-box:11434/")]).unwrap();
        assert_eq!(config.api_base_url(), "http://gpu-box:11434/v1");
    }
}
