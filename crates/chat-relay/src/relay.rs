//! Chat relay: validate, pick a provider, forward the conversation.

use axum::response::Response;
use thiserror::Error;
use tracing::{debug, error};

use crate::llm::{LLMError, Message, Provider, ProviderRegistry, UnknownProvider};
use crate::response::{self, DetailPolicy};

/// Sampling temperature sent with every completion.
pub const TEMPERATURE: f32 = 0.7;

pub const VALIDATION_MESSAGE: &str = "Please enter a message.";
pub const MALFORMED_BODY_MESSAGE: &str = "Invalid request body.";
pub const CONFIGURATION_MESSAGE: &str =
    "No valid AI service configured. Set AI_SERVICE to zhipu or openai.";
pub const PROVIDER_MESSAGE: &str = "Chat request failed, please try again.";

/// A user turn plus the conversation that preceded it.
#[derive(Debug, Default)]
pub struct Turn {
    pub message: Option<String>,
    pub history: Vec<Message>,
}

/// Result of a successful relay.
#[derive(Debug, PartialEq, Eq)]
pub struct Exchange {
    pub reply: String,
    /// Input history followed by the user turn and the assistant turn.
    pub history: Vec<Message>,
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("message is missing or empty")]
    Validation,

    /// Body was not JSON or did not match the expected shape.
    #[error("malformed request body: {reason}")]
    MalformedBody { reason: String },

    #[error("no provider matches AI service '{service}'")]
    Configuration { service: String },

    #[error(transparent)]
    Provider(#[from] LLMError),
}

impl From<UnknownProvider> for RelayError {
    fn from(err: UnknownProvider) -> Self {
        RelayError::Configuration { service: err.0 }
    }
}

impl RelayError {
    /// Render as an HTTP response. Configuration errors never carry details.
    pub fn render(self, policy: DetailPolicy) -> Response {
        match self {
            RelayError::Validation => response::bad_request(VALIDATION_MESSAGE, None),
            RelayError::MalformedBody { reason } => {
                response::bad_request(MALFORMED_BODY_MESSAGE, policy.apply(|| reason))
            }
            RelayError::Configuration { .. } => {
                response::internal_error(CONFIGURATION_MESSAGE, None)
            }
            RelayError::Provider(e) => {
                response::internal_error(PROVIDER_MESSAGE, policy.apply(|| e.to_string()))
            }
        }
    }

    /// Log the error at the level its kind warrants.
    pub fn log(&self) {
        match self {
            RelayError::Validation => debug!("Rejected chat request without a message"),
            RelayError::MalformedBody { reason } => {
                debug!(reason = %reason, "Rejected malformed chat request body");
            }
            RelayError::Configuration { service } => {
                error!(service = %service, "No provider configured for AI service");
            }
            RelayError::Provider(e) => error!(error = %e, "Chat completion failed"),
        }
    }
}

/// Forwards turns to the provider named by the configured service.
pub struct ChatRelay {
    providers: ProviderRegistry,
    service: String,
}

impl ChatRelay {
    pub fn new(providers: ProviderRegistry, service: impl Into<String>) -> Self {
        Self {
            providers,
            service: service.into(),
        }
    }

    /// Whether the configured service names a provider with a credential.
    pub fn is_ready(&self) -> bool {
        self.service
            .parse::<Provider>()
            .is_ok_and(|provider| self.providers.contains(provider))
    }

    pub async fn relay(&self, turn: Turn) -> Result<Exchange, RelayError> {
        let message = turn
            .message
            .filter(|m| !m.trim().is_empty())
            .ok_or(RelayError::Validation)?;

        let provider: Provider = self.service.parse()?;
        let client = self.providers.get(provider)?;

        let mut history = turn.history;
        history.push(Message::user(message));

        debug!(%provider, turns = history.len(), "Forwarding conversation");
        let reply = client.complete(&history, TEMPERATURE).await?;

        history.push(Message::assistant(reply.clone()));
        Ok(Exchange { reply, history })
    }
}
