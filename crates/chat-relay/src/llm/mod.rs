//! LLM provider client for chat completions.

mod error;
mod openai;
mod provider;
mod registry;
mod types;

#[cfg(test)]
pub(crate) mod mock;

pub use error::LLMError;
pub use openai::OpenAICompatibleProvider;
pub use provider::{LLMProvider, NO_REPLY_PLACEHOLDER, Provider, UnknownProvider};
pub use registry::ProviderRegistry;
pub use types::{Message, Role};
