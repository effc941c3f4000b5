//! Token-budget-aware batching of per-file diffs.
//!
//! Groups file diffs into batches that fit within the model's token
//! budget so a large change set can be summarized in a handful of
//! requests instead of one per file. Packing is a single greedy
//! left-to-right pass: simple, order-preserving, and good enough for the
//! latencies involved.

use crate::git::diff_split::FileDiff;
use crate::llm::token_budget::estimate_tokens;

/// A group of file diffs to summarize in one request.
#[derive(Debug)]
pub struct DiffBatch {
    /// File diffs in this batch, in original diff order.
    pub files: Vec<FileDiff>,
    /// Estimated total tokens for all files in this batch.
    pub estimated_tokens: usize,
}

impl DiffBatch {
    /// Concatenates the raw diff text of every file in the batch,
    /// separated by blank lines.
    #[must_use]
    pub fn combined_content(&self) -> String {
        self.files
            .iter()
            .map(|fd| fd.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Groups file diffs into batches whose estimated cost stays within
/// `token_limit`.
///
/// Files are taken in order. A file whose own estimate exceeds the limit
/// closes the running batch and is emitted as a singleton — an accepted
/// overflow, never split further. Otherwise a file that would push the
/// running batch over the limit starts a new batch. Batches are never
/// empty, and their concatenation equals the input list.
#[must_use]
pub fn plan_batches(file_diffs: Vec<FileDiff>, token_limit: usize) -> Vec<DiffBatch> {
    let mut batches = Vec::new();
    let mut current: Vec<FileDiff> = Vec::new();
    let mut current_tokens = 0;

    for file_diff in file_diffs {
        let file_tokens = estimate_tokens(&file_diff.content);

        // A single file over the limit gets its own batch.
        if file_tokens > token_limit {
            if !current.is_empty() {
                batches.push(DiffBatch {
                    files: std::mem::take(&mut current),
                    estimated_tokens: current_tokens,
                });
                current_tokens = 0;
            }
            batches.push(DiffBatch {
                files: vec![file_diff],
                estimated_tokens: file_tokens,
            });
            continue;
        }

        if current_tokens + file_tokens > token_limit && !current.is_empty() {
            batches.push(DiffBatch {
                files: std::mem::take(&mut current),
                estimated_tokens: current_tokens,
            });
            current_tokens = 0;
        }

        current_tokens += file_tokens;
        current.push(file_diff);
    }

    if !current.is_empty() {
        batches.push(DiffBatch {
            files: current,
            estimated_tokens: current_tokens,
        });
    }

    batches
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    /// Builds a file diff whose content estimates to roughly `tokens`.
    fn make_file_diff(path: &str, tokens: usize) -> FileDiff {
        FileDiff {
            path: path.to_string(),
            content: "x".repeat(tokens * 4),
        }
    }

    fn paths(batch: &DiffBatch) -> Vec<&str> {
        batch.files.iter().map(|f| f.path.as_str()).collect()
    }

    #[test]
    fn plan_batches_empty_input() {
        assert!(plan_batches(Vec::new(), 1000).is_empty());
    }

    #[test]
    fn plan_batches_all_fit_one_batch() {
        let files = vec![
            make_file_diff("a.rs", 100),
            make_file_diff("b.rs", 200),
            make_file_diff("c.rs", 150),
        ];
        let batches = plan_batches(files, 1000);
        assert_eq!(batches.len(), 1);
        assert_eq!(paths(&batches[0]), vec!["a.rs", "b.rs", "c.rs"]);
        assert_eq!(batches[0].estimated_tokens, 450);
    }

    #[test]
    fn plan_batches_splits_at_limit() {
        let files = vec![
            make_file_diff("a.rs", 80),
            make_file_diff("b.rs", 80),
            make_file_diff("c.rs", 80),
        ];
        let batches = plan_batches(files, 160);
        assert_eq!(batches.len(), 2);
        assert_eq!(paths(&batches[0]), vec!["a.rs", "b.rs"]);
        assert_eq!(paths(&batches[1]), vec!["c.rs"]);
    }

    #[test]
    fn plan_batches_oversized_file_gets_solo_batch() {
        // 100 fits, 9000 overflows alone, 50 fits: three batches, not two.
        let files = vec![
            make_file_diff("file1.rs", 100),
            make_file_diff("file2.rs", 9000),
            make_file_diff("file3.rs", 50),
        ];
        let batches = plan_batches(files, 120);
        assert_eq!(batches.len(), 3);
        assert_eq!(paths(&batches[0]), vec!["file1.rs"]);
        assert_eq!(paths(&batches[1]), vec!["file2.rs"]);
        assert_eq!(paths(&batches[2]), vec!["file3.rs"]);
        assert!(batches[1].estimated_tokens > 120);
    }

    #[test]
    fn plan_batches_oversized_file_closes_running_batch() {
        let files = vec![
            make_file_diff("small.rs", 10),
            make_file_diff("huge.rs", 500),
            make_file_diff("tail.rs", 10),
        ];
        let batches = plan_batches(files, 100);
        assert_eq!(batches.len(), 3);
        assert_eq!(paths(&batches[0]), vec!["small.rs"]);
        assert_eq!(paths(&batches[1]), vec!["huge.rs"]);
        assert_eq!(paths(&batches[2]), vec!["tail.rs"]);
    }

    #[test]
    fn plan_batches_partitions_input_in_order() {
        let files: Vec<FileDiff> = (0..17)
            .map(|i| make_file_diff(&format!("f{i}.rs"), 37))
            .collect();
        let original: Vec<String> = files.iter().map(|f| f.path.clone()).collect();

        let batches = plan_batches(files, 100);

        let mut rejoined = Vec::new();
        for batch in &batches {
            assert!(!batch.files.is_empty(), "batches are never empty");
            assert!(
                batch.estimated_tokens <= 100 || batch.files.len() == 1,
                "only singleton batches may exceed the limit"
            );
            rejoined.extend(batch.files.iter().map(|f| f.path.clone()));
        }
        assert_eq!(rejoined, original);
    }

    #[test]
    fn combined_content_joins_with_blank_lines() {
        let batch = DiffBatch {
            files: vec![
                FileDiff {
                    path: "a.rs".to_string(),
                    content: "diff a".to_string(),
                },
                FileDiff {
                    path: "b.rs".to_string(),
                    content: "diff b".to_string(),
                },
            ],
            estimated_tokens: 3,
        };
        assert_eq!(batch.combined_content(), "diff a\n\ndiff b");
    }
}
