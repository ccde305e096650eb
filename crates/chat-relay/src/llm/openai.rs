//! OpenAI-compatible LLM provider.
//!
//! Both supported services (Zhipu and OpenAI) expose the same
//! `/chat/completions` contract, so one implementation serves both.

use async_trait::async_trait;
use reqwest::Client;

use super::error::LLMError;
use super::provider::{LLMProvider, NO_REPLY_PLACEHOLDER, Provider};
use super::types::{ChatRequest, ChatResponse, Message};

/// OpenAI-compatible provider bound to one model and API key.
pub struct OpenAICompatibleProvider {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAICompatibleProvider {
    #[must_use]
    pub fn new(client: Client, base_url: String, api_key: String, model: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
            model,
        }
    }

    /// Provider preset with its default endpoint and model.
    #[must_use]
    pub fn for_provider(client: Client, provider: Provider, api_key: String) -> Self {
        Self::new(
            client,
            provider.default_base_url().to_string(),
            api_key,
            provider.default_model().to_string(),
        )
    }
}

#[async_trait]
impl LLMProvider for OpenAICompatibleProvider {
    async fn complete(&self, messages: &[Message], temperature: f32) -> Result<String, LLMError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let request = ChatRequest {
            model: &self.model,
            messages,
            temperature,
        };

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(LLMError::Api { status, message });
        }

        let chat_response: ChatResponse = response.json().await?;
        Ok(chat_response
            .reply_text()
            .unwrap_or_else(|| NO_REPLY_PLACEHOLDER.to_string()))
    }
}
