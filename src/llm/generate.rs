//! Commit message and branch name generation.

use anyhow::{Context, Result};
use tracing::warn;

use crate::llm::client::LlmClient;
use crate::llm::prompts;
use crate::llm::summarize::{process_diff, ProcessedDiff, DEFAULT_CONCURRENCY};

/// Token limit applied to diffs before they are embedded in a prompt.
/// Diffs estimated above this are run through the summarization pipeline.
pub const DIFF_TOKEN_LIMIT: usize = 32_000;

/// Options controlling commit message generation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommitMessageOptions {
    /// Use conventional commit format for the subject line.
    pub conventional: bool,
    /// Generate a body after the subject line.
    pub with_description: bool,
}

/// Generates a commit message from the staged diff and repository
/// history.
///
/// Oversized diffs are summarized first; if the pipeline itself fails the
/// raw diff is used as-is rather than blocking generation.
pub async fn generate_commit_message(
    client: &LlmClient,
    diff: &str,
    changed_files: &str,
    recent_commits: &str,
    options: CommitMessageOptions,
) -> Result<String> {
    let processed = summarize_if_needed(client, diff).await;

    let system_prompt = prompts::commit_system_prompt(
        options.conventional,
        options.with_description,
        processed.summarized,
    );
    let user_prompt = prompts::commit_user_prompt(&processed.text, changed_files, recent_commits);

    client
        .chat(&system_prompt, &user_prompt)
        .await
        .context("failed to generate commit message")
}

/// Generates a branch name from a free-form description, avoiding
/// collisions with existing branches. The staged diff may be supplied as
/// extra context and is summarized when oversized.
pub async fn generate_branch_name(
    client: &LlmClient,
    request: &str,
    local_branches: &[String],
    remote_branches: &[String],
    diff: &str,
) -> Result<String> {
    let processed = if diff.is_empty() {
        ProcessedDiff {
            text: String::new(),
            summarized: false,
        }
    } else {
        summarize_if_needed(client, diff).await
    };

    let system_prompt = prompts::branch_system_prompt(processed.summarized);
    let user_prompt =
        prompts::branch_user_prompt(request, local_branches, remote_branches, &processed.text);

    let response = client
        .chat(&system_prompt, &user_prompt)
        .await
        .context("failed to generate branch name")?;

    Ok(sanitize_branch_name(&response))
}

/// Runs the summarization pipeline, degrading to the raw diff on
/// pipeline failure.
async fn summarize_if_needed(client: &LlmClient, diff: &str) -> ProcessedDiff {
    match process_diff(client, diff, DIFF_TOKEN_LIMIT, DEFAULT_CONCURRENCY).await {
        Ok(processed) => processed,
        Err(e) => {
            warn!(error = %e, "diff summarization failed, using original diff");
            ProcessedDiff {
                text: diff.to_string(),
                summarized: false,
            }
        }
    }
}

/// Normalizes a model-suggested branch name to git-friendly form:
/// spaces become hyphens, disallowed characters become hyphens, hyphen
/// runs collapse, and leading/trailing hyphens are trimmed.
#[must_use]
pub fn sanitize_branch_name(name: &str) -> String {
    let mapped: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '/' | '_' | '.') {
                c
            } else {
                '-'
            }
        })
        .collect();

    let mut collapsed = mapped;
    while collapsed.contains("--") {
        collapsed = collapsed.replace("--", "-");
    }

    collapsed.trim_matches('-').to_string()
}
