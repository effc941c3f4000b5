//! Chat provider trait and provider selection.

use std::future::Future;
use std::pin::Pin;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::llm::anthropic::AnthropicProvider;
use crate::llm::openai::OpenAiProvider;

/// A message in a chat conversation.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChatMessage {
    /// Message role: "system", "user", or "assistant".
    pub role: String,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Creates a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Creates a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Trait for chat completion API providers.
pub trait ChatProvider: Send + Sync {
    /// Sends a chat completion request and returns the response text.
    fn chat_completion<'a>(
        &'a self,
        model: &'a str,
        messages: &'a [ChatMessage],
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;
}

/// Creates a chat provider for the configured provider name.
///
/// "anthropic" selects the Messages API client; every other name is
/// treated as OpenAI-compatible (OpenAI, Ollama, and most self-hosted
/// gateways speak that dialect).
#[must_use]
pub fn create_provider(provider: &str, endpoint: &str, api_key: &str) -> Box<dyn ChatProvider> {
    debug!(provider, endpoint, "creating chat provider");

    match provider {
        "anthropic" => Box::new(AnthropicProvider::new(endpoint, api_key)),
        _ => Box::new(OpenAiProvider::new(endpoint, api_key)),
    }
}
