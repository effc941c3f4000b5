//! OpenAI-compatible chat completion client (works with OpenAI, Ollama,
//! and most self-hosted gateways).

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::llm::error::LlmError;
use crate::llm::provider::{ChatMessage, ChatProvider};

/// Request timeout for chat completion calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Chat completion request body.
#[derive(Serialize, Debug)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

/// One choice in a chat completion response.
#[derive(Deserialize, Debug)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize, Debug)]
struct ResponseMessage {
    content: String,
}

/// Error object embedded in an otherwise-200 response body.
#[derive(Deserialize, Debug)]
struct ApiError {
    message: String,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    error: Option<ApiError>,
}

/// Client for OpenAI-compatible chat completion endpoints.
pub struct OpenAiProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiProvider {
    /// Creates a new client for an OpenAI-compatible endpoint.
    ///
    /// `endpoint` is the API base (e.g. "https://api.openai.com/v1");
    /// the chat completions path is appended per request.
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
        format!("{}/chat/completions", self.base_url)
    }
}

impl ChatProvider for OpenAiProvider {
    fn chat_completion<'a>(
        &'a self,
        model: &'a str,
        messages: &'a [ChatMessage],
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(async move {
            let request = ChatCompletionRequest {
                model,
                messages,
                temperature: 0.7,
                max_tokens: 1000,
            };

            let url = self.api_url();
            debug!(url = %url, model, message_count = messages.len(), "sending chat completion request");

            let response = self
                .client
                .post(&url)
                .header("Content-Type", "application/json")
                .header("Authorization", format!("Bearer {}", self.api_key))
                .json(&request)
                .send()
                .await
                .map_err(|e| LlmError::NetworkError(e.to_string()))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(LlmError::ApiRequestFailed(format!("HTTP {status}: {body}")).into());
            }

            let completion: ChatCompletionResponse = response
                .json()
                .await
                .map_err(|e| LlmError::InvalidResponseFormat(e.to_string()))?;

            if let Some(error) = completion.error {
                return Err(LlmError::ApiRequestFailed(error.message).into());
            }

            completion
                .choices
                .into_iter()
                .next()
                .map(|choice| choice.message.content)
                .ok_or_else(|| {
                    LlmError::InvalidResponseFormat("no choices in response".to_string()).into()
                })
        })
    }
}
