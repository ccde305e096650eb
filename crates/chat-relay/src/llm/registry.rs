//! Provider registry for managing LLM provider instances.

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::Client;
use tracing::{info, warn};

use super::error::LLMError;
use super::openai::OpenAICompatibleProvider;
use super::provider::{LLMProvider, Provider};
use crate::config::Credentials;

/// Registry of LLM providers, keyed by provider type.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<Provider, Arc<dyn LLMProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a provider for every service that has an API key.
    pub fn from_credentials(client: Client, credentials: &Credentials) -> Self {
        let mut registry = Self::new();

        for provider in Provider::ALL {
            let Some(api_key) = credentials.api_key(provider) else {
                continue;
            };
            let implementation =
                OpenAICompatibleProvider::for_provider(client.clone(), provider, api_key.to_string());
            registry.register(provider, Arc::new(implementation));
            info!(%provider, model = provider.default_model(), "Registered provider");
        }

        if registry.providers.is_empty() {
            warn!("No LLM providers configured. Set ZHIPU_API_KEY or OPENAI_API_KEY.");
        }

        registry
    }

    /// Register a provider implementation.
    pub fn register(&mut self, provider: Provider, implementation: Arc<dyn LLMProvider>) {
        self.providers.insert(provider, implementation);
    }

    /// Get a provider by type, failing if its credential was never supplied.
    pub fn get(&self, provider: Provider) -> Result<Arc<dyn LLMProvider>, LLMError> {
        self.providers
            .get(&provider)
            .cloned()
            .ok_or(LLMError::MissingCredential {
                provider,
                env_var: provider.api_key_env(),
            })
    }

    pub fn contains(&self, provider: Provider) -> bool {
        self.providers.contains_key(&provider)
    }
}
