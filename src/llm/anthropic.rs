//! Anthropic Messages API client.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::llm::error::LlmError;
use crate::llm::provider::{ChatMessage, ChatProvider};

/// Request timeout for message calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// API version header required by the Messages API.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Messages API request body.
#[derive(Serialize, Debug)]
struct MessagesRequest<'a> {
    model: &'a str,
    messages: Vec<&'a ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
}

/// One content block in a Messages API response.
#[derive(Deserialize, Debug)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: String,
}

#[derive(Deserialize, Debug)]
struct ApiError {
    message: String,
}

#[derive(Deserialize, Debug)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    error: Option<ApiError>,
}

/// Client for Anthropic's Messages API.
pub struct AnthropicProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl AnthropicProvider {
    /// Creates a new Messages API client.
    ///
    /// `endpoint` is the API base (e.g. "https://api.anthropic.com/v1").
    #[must_use]
    pub fn new(endpoint: &str, api_key: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            base_url: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn api_url(&self) -> String {
        format!("{}/messages", self.base_url)
    }
}

impl ChatProvider for AnthropicProvider {
    fn chat_completion<'a>(
        &'a self,
        model: &'a str,
        messages: &'a [ChatMessage],
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(async move {
            // The Messages API takes the system prompt as a separate
            // field, not as a conversation message.
            let system = messages
                .iter()
                .find(|m| m.role == "system")
                .map(|m| m.content.as_str());
            let conversation: Vec<&ChatMessage> =
                messages.iter().filter(|m| m.role != "system").collect();

            let request = MessagesRequest {
                model,
                messages: conversation,
                max_tokens: 4096,
                temperature: 0.7,
                system,
            };

            let url = self.api_url();
            debug!(url = %url, model, has_system = system.is_some(), "sending messages request");

            let response = self
                .client
                .post(&url)
                .header("Content-Type", "application/json")
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(&request)
                .send()
                .await
                .map_err(|e| LlmError::NetworkError(e.to_string()))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(LlmError::ApiRequestFailed(format!("HTTP {status}: {body}")).into());
            }

            let messages_response: MessagesResponse = response
                .json()
                .await
                .map_err(|e| LlmError::InvalidResponseFormat(e.to_string()))?;

            if let Some(error) = messages_response.error {
                return Err(LlmError::ApiRequestFailed(error.message).into());
            }

            if messages_response.content.is_empty() {
                return Err(
                    LlmError::InvalidResponseFormat("no content returned".to_string()).into(),
                );
            }

            // Concatenate all text content blocks.
            let text: String = messages_response
                .content
                .iter()
                .filter(|block| block.block_type == "text")
                .map(|block| block.text.as_str())
                .collect();

            Ok(text)
        })
    }
}
