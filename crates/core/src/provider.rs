use async_trait::async_trait;
use reqwest::Client;

use crate::error::{QuizReelError, Result};

/// Returned in place of a script when the service answers without any text.
pub const NO_SCRIPT_SENTINEL: &str = "Failed to generate script: No text found in Gemini response.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Provider {
    #[default]
    Gemini,
    Openai,
    Grok,
}

pub struct ProviderConfig {
    pub api_url: &'static str,
    pub model: &'static str,
    pub env_var: &'static str,
}

impl Provider {
    pub fn config(&self) -> ProviderConfig {
        match self {
            Provider::Gemini => ProviderConfig {
                api_url: "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent",
                model: "gemini-pro",
                env_var: "GEMINI_API_KEY",
            },
            Provider::Openai => ProviderConfig {
                api_url: "https://api.openai.com/v1/chat/completions",
                model: "gpt-5.1",
                env_var: "OPENAI_API_KEY",
            },
            Provider::Grok => ProviderConfig {
                api_url: "https://api.x.ai/v1/chat/completions",
                model: "grok-4-fast",
                env_var: "XAI_API_KEY",
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Provider::Gemini => "Gemini",
            Provider::Openai => "OpenAI",
            Provider::Grok => "Grok",
        }
    }

    /// Validate that the API key is set for this provider
    pub fn validate_api_key(&self) -> Result<String> {
        let config = self.config();
        std::env::var(config.env_var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| QuizReelError::MissingApiKey {
                env_var: config.env_var.to_string(),
            })
    }

    fn request_body(&self, prompt: &str) -> serde_json::Value {
        match self {
            Provider::Gemini => serde_json::json!({
                "contents": [
                    {
                        "parts": [
                            { "text": prompt }
                        ]
                    }
                ]
            }),
            Provider::Openai | Provider::Grok => serde_json::json!({
                "model": self.config().model,
                "messages": [
                    {
                        "role": "user",
                        "content": prompt,
                    },
                ],
                "temperature": 0.7,
            }),
        }
    }

    /// Pull the generated text out of a response body, if there is any.
    fn extract_text(&self, response: &serde_json::Value) -> Option<String> {
        match self {
            Provider::Gemini => response["candidates"][0]["content"]["parts"]
                .as_array()?
                .iter()
                .find_map(|part| part["text"].as_str())
                .map(str::to_string),
            Provider::Openai | Provider::Grok => response["choices"][0]["message"]["content"]
                .as_str()
                .map(str::to_string),
        }
    }
}

/// Text-generation collaborator: one prompt in, one script out.
#[async_trait]
pub trait ScriptGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

pub struct ProviderGenerator {
    client: Client,
    provider: Provider,
    api_key: String,
}

impl ProviderGenerator {
    /// Reads the provider's key from the environment; fails before any I/O when absent.
    pub fn from_env(provider: Provider) -> Result<Self> {
        let api_key = provider.validate_api_key()?;
        Self::with_api_key(provider, Some(api_key))
    }

    pub fn with_api_key(provider: Provider, api_key: Option<String>) -> Result<Self> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| QuizReelError::MissingApiKey {
                env_var: provider.config().env_var.to_string(),
            })?;

        Ok(Self {
            client: Client::builder().build()?,
            provider,
            api_key,
        })
    }
}

#[async_trait]
impl ScriptGenerator for ProviderGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let config = self.provider.config();
        let generation_failed = |reason: String| QuizReelError::GenerationFailed { reason };

        let request = match self.provider {
            Provider::Gemini => self
                .client
                .post(config.api_url)
                .query(&[("key", self.api_key.as_str())]),
            Provider::Openai | Provider::Grok => self
                .client
                .post(config.api_url)
                .header("Authorization", format!("Bearer {}", self.api_key)),
        };

        tracing::debug!(provider = self.provider.name(), prompt_len = prompt.len(), "requesting script");

        let response = request
            .header("Content-Type", "application/json")
            .json(&self.provider.request_body(prompt))
            .send()
            .await
            .map_err(|e| generation_failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(provider = self.provider.name(), %status, "generation request rejected");
            return Err(generation_failed(format!(
                "{} API error (status {}): {}",
                self.provider.name(),
                status,
                body
            )));
        }

        let response = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| generation_failed(format!("invalid response body: {}", e)))?;

        match self.provider.extract_text(&response) {
            Some(text) => Ok(text),
            None => {
                tracing::warn!(provider = self.provider.name(), "response carried no text");
                Ok(NO_SCRIPT_SENTINEL.to_string())
            }
        }
    }
}
