use async_trait::async_trait;

use crate::{
    error::{KonspektError, Result},
    provider::Provider,
};

/// One bounded text-generation request.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub system: &'static str,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// External text-generation collaborator.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns a single trimmed completion for the request.
    async fn generate(&self, request: GenerationRequest) -> Result<String>;
}

/// Chat-completions client for any OpenAI-compatible provider endpoint.
pub struct ChatClient {
    provider: Provider,
    http: reqwest::Client,
}

impl ChatClient {
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            http: reqwest::Client::new(),
        }
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }
}

#[async_trait]
impl TextGenerator for ChatClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String> {
        let config = self.provider.config();
        let api_key = self.provider.validate_api_key()?;

        let response = self
            .http
            .post(config.api_url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&serde_json::json!({
                "model": config.model,
                "messages": [
                    {
                        "role": "system",
                        "content": request.system,
                    },
                    {
                        "role": "user",
                        "content": request.prompt,
                    },
                ],
                "max_tokens": request.max_tokens,
                "temperature": request.temperature,
            }))
            .send()
            .await?
            .json::<serde_json::Value>()
            .await?;

        let content = response["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| KonspektError::InvalidResponse {
                reason: format!("unexpected completion body: {:?}", response),
            })?;

        Ok(content.trim().to_string())
    }
}
