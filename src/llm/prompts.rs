//! Prompt templates for commit message, branch name, and diff summary
//! generation.

use std::fmt::Write as _;

/// Exact reply a model must give when a batch contains only formatting
/// or whitespace changes. The summarizer maps it to a structured no-op
/// before it reaches the pipeline.
pub const MINOR_CHANGES_SENTINEL: &str = "MINOR CHANGES ONLY";

/// System prompt for per-batch diff summarization.
pub const DIFF_SUMMARY_SYSTEM_PROMPT: &str = "\
You are an expert software engineer summarizing code changes. You will receive \
a portion of a git diff covering one or more files.

Write a concise summary (2-4 sentences) of the functional changes: new or \
removed behavior, modified logic, bug fixes, API changes. Mention the files \
involved. Do not restate the diff line by line.

If the changes are purely formatting, whitespace, import reordering, or other \
mechanical edits with no functional impact, reply with exactly:
MINOR CHANGES ONLY";

const CONVENTIONAL_FORMAT_SECTION: &str = "\
Use the conventional commit format: <type>(<scope>): <description>
Allowed types: feat, fix, docs, style, refactor, perf, test, build, ci, chore, revert.
The scope is optional; use it when the change is clearly confined to one area.";

const PLAIN_FORMAT_SECTION: &str = "\
Write the subject line in plain imperative style without a type prefix.";

const DESCRIPTION_SECTION: &str = "\
After the subject line, add a blank line and a short body explaining what \
changed and why. Wrap body lines at 72 characters.";

const SUBJECT_ONLY_SECTION: &str = "\
Reply with a single subject line and nothing else.";

const SUMMARIZED_DIFF_NOTICE: &str = "\
Note: the diff was too large to include verbatim; you are seeing \
machine-generated per-file summaries of the changes instead of raw diff text.";

/// Builds the system prompt for commit message generation.
#[must_use]
pub fn commit_system_prompt(
    use_conventional: bool,
    with_description: bool,
    diff_summarized: bool,
) -> String {
    let mut prompt = String::from(
        "You are an expert software engineer writing a git commit message for \
         staged changes. Base the message on what the code changes actually \
         do, not on file names alone.\n\n\
         Guidelines:\n\
         - Use imperative mood (\"add\" not \"added\")\n\
         - Keep the subject line under 72 characters\n\
         - Do not end the subject line with a period\n\
         - Do not wrap the reply in quotes or code fences\n\n",
    );

    if use_conventional {
        prompt.push_str(CONVENTIONAL_FORMAT_SECTION);
    } else {
        prompt.push_str(PLAIN_FORMAT_SECTION);
    }
    prompt.push_str("\n\n");

    if with_description {
        prompt.push_str(DESCRIPTION_SECTION);
    } else {
        prompt.push_str(SUBJECT_ONLY_SECTION);
    }

    if diff_summarized {
        prompt.push_str("\n\n");
        prompt.push_str(SUMMARIZED_DIFF_NOTICE);
    }

    prompt
}

/// Builds the user prompt for commit message generation.
#[must_use]
pub fn commit_user_prompt(diff: &str, changed_files: &str, recent_commits: &str) -> String {
    let mut prompt = String::new();

    let _ = writeln!(prompt, "Changed files:\n{}", format_as_list(changed_files));

    if !recent_commits.trim().is_empty() {
        let _ = writeln!(
            prompt,
            "Recent commit messages in this repository, for style reference:\n{}",
            format_as_list(recent_commits)
        );
    }

    let _ = write!(
        prompt,
        "Write a commit message for these staged changes:\n\n```diff\n{diff}\n```"
    );

    prompt
}

/// Builds the system prompt for branch name generation.
#[must_use]
pub fn branch_system_prompt(diff_summarized: bool) -> String {
    let mut prompt = String::from(
        "You are helping a developer name a git branch. Reply with a single \
         short branch name and nothing else.\n\n\
         Guidelines:\n\
         - Use lowercase words separated by hyphens\n\
         - Optionally use a category prefix like feature/, fix/, or chore/\n\
         - Keep it under 40 characters\n\
         - Do not collide with any of the existing branches listed",
    );

    if diff_summarized {
        prompt.push_str("\n\n");
        prompt.push_str(SUMMARIZED_DIFF_NOTICE);
    }

    prompt
}

/// Builds the user prompt for branch name generation.
#[must_use]
pub fn branch_user_prompt(
    request: &str,
    local_branches: &[String],
    remote_branches: &[String],
    diff: &str,
) -> String {
    let mut prompt = format!("The developer describes the work as:\n{request}\n\n");

    let _ = writeln!(
        prompt,
        "Existing local branches:\n{}",
        format_as_list(&local_branches.join("\n"))
    );
    let _ = writeln!(
        prompt,
        "Existing remote branches:\n{}",
        format_as_list(&remote_branches.join("\n"))
    );

    if !diff.is_empty() {
        let _ = write!(
            prompt,
            "Staged changes for context:\n\n```diff\n{diff}\n```\n\n"
        );
    }

    prompt.push_str("Suggest a branch name.");
    prompt
}

/// Builds the user prompt for a diff summary batch.
#[must_use]
pub fn diff_summary_user_prompt(batch_content: &str) -> String {
    format!("Summarize the changes in this diff:\n\n```diff\n{batch_content}\n```")
}

/// Formats a newline-separated string as a bulleted list, skipping blank
/// lines.
fn format_as_list(input: &str) -> String {
    let mut result = String::new();
    for line in input.lines() {
        let line = line.trim();
        if !line.is_empty() {
            let _ = writeln!(result, "- {line}");
        }
    }
    result
}
