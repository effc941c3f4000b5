//! Map-reduce summarization of oversized diffs.
//!
//! Large staged diffs blow past the model's context window, so before a
//! commit message or branch name is generated the diff is split by file,
//! packed into token-budget batches, and summarized batch-by-batch with
//! bounded parallelism. The surviving summaries are reassembled into one
//! bounded document in original batch order.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, warn};

use crate::git::diff_split::split_by_file;
use crate::llm::batch::{plan_batches, DiffBatch};
use crate::llm::token_budget::estimate_tokens;

/// Default cap on simultaneously in-flight summarization requests.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Characters of raw diff kept per file when falling back after a failed
/// summarization request.
const FALLBACK_TRUNCATE_CHARS: usize = 500;

/// Appended to fallback content that was cut at the truncation limit.
const TRUNCATION_MARKER: &str = "... (truncated)";

/// Header placed above the assembled per-batch summaries.
const SUMMARY_HEADER: &str = "# Summarized Changes";

/// Returned when every batch turned out to be formatting noise.
const FORMATTING_ONLY_MESSAGE: &str =
    "Minor formatting and refactoring changes with no functional impact.";

/// Outcome of summarizing one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchSummary {
    /// A natural-language summary of the batch.
    Summary(String),
    /// The batch contains no meaningful change (formatting, whitespace)
    /// and should be dropped from the assembled document.
    NoOp,
}

/// Per-batch summarization operation, supplied by the caller.
///
/// The LLM-backed implementation lives in [`crate::llm::client`]; tests
/// substitute deterministic mocks.
pub trait DiffSummarizer: Send + Sync {
    /// Summarizes the concatenated raw diff text of one batch.
    fn summarize_batch<'a>(
        &'a self,
        batch_content: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<BatchSummary>> + Send + 'a>>;
}

/// Result of running a diff through the summarization pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedDiff {
    /// The original diff (fast path) or the assembled summary document.
    pub text: String,
    /// Whether summarization actually occurred.
    pub summarized: bool,
}

/// Runs `diff` through the summarization pipeline if it exceeds
/// `token_limit`.
///
/// Small diffs pass through untouched. Oversized diffs are split per
/// file, batched, and summarized with at most `concurrency` requests in
/// flight; a diff with no recognizable file sections also passes through
/// untouched. Per-batch failures degrade to truncated raw content and
/// never fail the pipeline; batches reported as no-ops are dropped from
/// the output. Output order always matches batch order.
pub async fn process_diff(
    summarizer: &dyn DiffSummarizer,
    diff: &str,
    token_limit: usize,
    concurrency: usize,
) -> Result<ProcessedDiff> {
    let diff_tokens = estimate_tokens(diff);
    if diff_tokens <= token_limit {
        return Ok(ProcessedDiff {
            text: diff.to_string(),
            summarized: false,
        });
    }

    debug!(
        estimated_tokens = diff_tokens,
        token_limit, "diff exceeds token limit, summarizing by file"
    );

    let file_diffs = split_by_file(diff);
    if file_diffs.is_empty() {
        // No recognizable structure to split; hand the diff back as-is.
        return Ok(ProcessedDiff {
            text: diff.to_string(),
            summarized: false,
        });
    }

    let batches = plan_batches(file_diffs, token_limit);
    debug!(batch_count = batches.len(), "planned summarization batches");

    let semaphore = Arc::new(tokio::sync::Semaphore::new(concurrency));

    // Map phase: summarize batches in parallel, bounded by the semaphore.
    // `join_all` yields results in future order, so slot i always holds
    // batch i's contribution no matter which request finishes first.
    let futs: Vec<_> = batches
        .iter()
        .enumerate()
        .map(|(index, batch)| {
            let sem = semaphore.clone();
            async move {
                let _permit = sem
                    .acquire()
                    .await
                    .map_err(|e| anyhow::anyhow!("semaphore closed: {e}"))?;

                let content = batch.combined_content();
                match summarizer.summarize_batch(&content).await {
                    Ok(BatchSummary::Summary(text)) => Ok::<_, anyhow::Error>(text),
                    Ok(BatchSummary::NoOp) => Ok(String::new()),
                    Err(e) => {
                        warn!(batch = index, error = %e, "failed to summarize batch, using truncated fallback");
                        Ok(fallback_for_batch(batch))
                    }
                }
            }
        })
        .collect();

    let results = futures::future::join_all(futs).await;

    let mut summaries = Vec::with_capacity(results.len());
    for result in results {
        summaries.push(result?);
    }

    // Reduce phase: drop no-op contributions and join the rest.
    let surviving: Vec<String> = summaries.into_iter().filter(|s| !s.is_empty()).collect();

    if surviving.is_empty() {
        return Ok(ProcessedDiff {
            text: FORMATTING_ONLY_MESSAGE.to_string(),
            summarized: true,
        });
    }

    let text = format!("{SUMMARY_HEADER}\n\n{}", surviving.join("\n\n"));
    debug!(
        summarized_tokens = estimate_tokens(&text),
        original_tokens = diff_tokens,
        "assembled summarized diff"
    );

    Ok(ProcessedDiff {
        text,
        summarized: true,
    })
}

/// Builds the substitute contribution for a batch whose summarization
/// request failed: each file's path plus its raw diff, truncated.
fn fallback_for_batch(batch: &DiffBatch) -> String {
    batch
        .files
        .iter()
        .map(|fd| format!("File: {}\n{}", fd.path, truncate_chars(&fd.content)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Truncates `content` to the fallback limit, counted in characters so a
/// multi-byte boundary can never split a code point.
fn truncate_chars(content: &str) -> String {
    match content.char_indices().nth(FALLBACK_TRUNCATE_CHARS) {
        Some((byte_idx, _)) => format!("{}{TRUNCATION_MARKER}", &content[..byte_idx]),
        None => content.to_string(),
    }
}
