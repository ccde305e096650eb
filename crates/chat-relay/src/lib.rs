//! Chat Relay - forwards a chat turn and its history to a configured LLM provider.

pub mod config;
pub mod handlers;
pub mod llm;
pub mod relay;
pub mod response;
pub mod server;
