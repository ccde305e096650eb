//! LLM provider trait and the closed set of supported providers.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

use super::error::LLMError;
use super::types::Message;

/// Reply used when a provider answers without any usable text.
pub const NO_REPLY_PLACEHOLDER: &str = "Sorry, no reply was received.";

/// A chat-completion backend with its credential already bound.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Complete the conversation and return the assistant's reply text.
    ///
    /// Returns [`NO_REPLY_PLACEHOLDER`] when the provider responds without
    /// extractable text. Transport and API errors are returned as-is.
    async fn complete(&self, messages: &[Message], temperature: f32) -> Result<String, LLMError>;
}

/// Supported LLM providers, selected by the `AI_SERVICE` setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Provider {
    #[default]
    Zhipu,
    OpenAI,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Zhipu, Provider::OpenAI];

    /// Identifier used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Zhipu => "zhipu",
            Provider::OpenAI => "openai",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Zhipu => "glm-4",
            Provider::OpenAI => "gpt-3.5-turbo",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::Zhipu => "https://open.bigmodel.cn/api/paas/v4",
            Provider::OpenAI => "https://api.openai.com/v1",
        }
    }

    /// Environment variable holding the provider's API key.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Provider::Zhipu => "ZHIPU_API_KEY",
            Provider::OpenAI => "OPENAI_API_KEY",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a configured service name matches no provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown AI service: {0}")]
pub struct UnknownProvider(pub String);

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Provider::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownProvider(s.to_string()))
    }
}
