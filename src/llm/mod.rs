//! LLM integration: providers, prompts, and the diff summarization
//! pipeline.

pub mod anthropic;
pub mod batch;
pub mod client;
pub mod error;
pub mod generate;
pub mod openai;
pub mod prompts;
pub mod provider;
pub mod summarize;
pub mod token_budget;

pub use client::LlmClient;
pub use error::LlmError;
pub use generate::{generate_branch_name, generate_commit_message, CommitMessageOptions};
pub use summarize::{process_diff, BatchSummary, DiffSummarizer, ProcessedDiff};
