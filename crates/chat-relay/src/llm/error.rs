//! LLM error types.

use thiserror::Error;

use super::provider::Provider;

/// Errors that can occur when making LLM API calls.
#[derive(Debug, Error)]
pub enum LLMError {
    /// HTTP request failed
    #[error("http request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// API returned an error response
    #[error("api error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// No credential available to construct the provider
    #[error("{provider} provider is not configured: {env_var} is not set")]
    MissingCredential {
        provider: Provider,
        env_var: &'static str,
    },
}
