//! High-level LLM client facade.

use std::future::Future;
use std::pin::Pin;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::llm::error::LlmError;
use crate::llm::prompts::{self, MINOR_CHANGES_SENTINEL};
use crate::llm::provider::{create_provider, ChatMessage, ChatProvider};
use crate::llm::summarize::{BatchSummary, DiffSummarizer};

/// Chat client bound to a configured provider and model.
pub struct LlmClient {
    provider: Box<dyn ChatProvider>,
    model: String,
}

impl LlmClient {
    /// Creates a client from the user configuration.
    ///
    /// Fails with [`LlmError::NotConfigured`] when the endpoint or API
    /// key is missing (Ollama endpoints need no key).
    pub fn from_config(config: &Config) -> Result<Self> {
        if config.endpoint.is_empty() || (config.api_key.is_empty() && config.provider != "ollama")
        {
            return Err(LlmError::NotConfigured.into());
        }

        let provider = create_provider(&config.provider, &config.endpoint, &config.api_key);

        Ok(Self {
            provider,
            model: config.model.clone(),
        })
    }

    /// Sends a system + user prompt pair and returns the trimmed reply.
    pub async fn chat(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let messages = [
            ChatMessage::system(system_prompt),
            ChatMessage::user(user_prompt),
        ];

        let response = self
            .provider
            .chat_completion(&self.model, &messages)
            .await
            .context("failed to get completion")?;

        Ok(response.trim().to_string())
    }
}

impl DiffSummarizer for LlmClient {
    /// Summarizes one batch of diff content, mapping the model's
    /// formatting-only sentinel reply to a structured no-op.
    fn summarize_batch<'a>(
        &'a self,
        batch_content: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<BatchSummary>> + Send + 'a>> {
        Box::pin(async move {
            let user_prompt = prompts::diff_summary_user_prompt(batch_content);
            let summary = self
                .chat(prompts::DIFF_SUMMARY_SYSTEM_PROMPT, &user_prompt)
                .await?;

            if summary == MINOR_CHANGES_SENTINEL {
                Ok(BatchSummary::NoOp)
            } else {
                Ok(BatchSummary::Summary(summary))
            }
        })
    }
}
