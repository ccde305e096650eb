//! Scripted provider for tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::error::LLMError;
use super::provider::LLMProvider;
use super::types::Message;

enum Script {
    Reply(String),
    Fail { status: u16, message: String },
    /// Real connection failure against a closed local port.
    Unreachable,
}

/// Provider that returns a fixed outcome and records every call.
pub struct MockProvider {
    script: Script,
    calls: AtomicUsize,
    seen: Mutex<Vec<(Vec<Message>, f32)>>,
    last_error: Mutex<Option<String>>,
}

impl MockProvider {
    pub fn replying(text: &str) -> Self {
        Self::with_script(Script::Reply(text.to_string()))
    }

    pub fn failing(status: u16, message: &str) -> Self {
        Self::with_script(Script::Fail {
            status,
            message: message.to_string(),
        })
    }

    pub fn unreachable() -> Self {
        Self::with_script(Script::Unreachable)
    }

    fn with_script(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
            last_error: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Arguments of the most recent call.
    pub fn last_call(&self) -> Option<(Vec<Message>, f32)> {
        self.seen.lock().unwrap().last().cloned()
    }

    /// Display string of the most recent error returned.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMProvider for MockProvider {
    async fn complete(&self, messages: &[Message], temperature: f32) -> Result<String, LLMError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push((messages.to_vec(), temperature));

        let err = match &self.script {
            Script::Reply(text) => return Ok(text.clone()),
            Script::Fail { status, message } => LLMError::Api {
                status: *status,
                message: message.clone(),
            },
            Script::Unreachable => {
                match reqwest::Client::new().post("http://127.0.0.1:1").send().await {
                    Ok(response) => LLMError::Api {
                        status: response.status().as_u16(),
                        message: "unexpected response".to_string(),
                    },
                    Err(e) => LLMError::Request(e),
                }
            }
        };

        *self.last_error.lock().unwrap() = Some(err.to_string());
        Err(err)
    }
}
