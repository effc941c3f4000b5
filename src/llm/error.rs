//! LLM-specific error handling.

use thiserror::Error;

/// Errors from the LLM provider layer.
#[derive(Error, Debug)]
pub enum LlmError {
    /// Endpoint or API key missing from the configuration.
    #[error("LLM endpoint or API key not configured. Run 'git-ai config' to set up")]
    NotConfigured,

    /// Request failed with a non-success status.
    #[error("LLM API request failed: {0}")]
    ApiRequestFailed(String),

    /// Response body could not be decoded.
    #[error("Invalid response format from LLM API: {0}")]
    InvalidResponseFormat(String),

    /// Network connectivity error.
    #[error("Network error: {0}")]
    NetworkError(String),
}

// Note: anyhow already has a blanket impl for thiserror::Error types
