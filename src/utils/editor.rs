//! External editor round-trip for reviewing generated text.

use std::env;
use std::fs;
use std::io::Write as _;
use std::process::Command;

use anyhow::{Context, Result};
use tracing::debug;

/// Returns the user's preferred editor: `GIT_EDITOR`, then `EDITOR`,
/// then `VISUAL`, falling back to `vi`.
#[must_use]
pub fn preferred_editor() -> String {
    for var in ["GIT_EDITOR", "EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            let editor = editor.trim().to_string();
            if !editor.is_empty() {
                return editor;
            }
        }
    }

    "vi".to_string()
}

/// Opens the preferred editor on `initial_content` and returns the
/// edited text.
pub fn edit_with_external_editor(initial_content: &str) -> Result<String> {
    let editor = preferred_editor();

    let mut tmp = tempfile::Builder::new()
        .prefix("git-ai-")
        .suffix(".txt")
        .tempfile()
        .context("failed to create temporary file")?;
    tmp.write_all(initial_content.as_bytes())
        .context("failed to write to temporary file")?;
    tmp.flush().context("failed to flush temporary file")?;

    // Editors may be configured with arguments ("code --wait").
    let mut parts = editor.split_whitespace();
    let program = parts.next().unwrap_or("vi");
    let args: Vec<&str> = parts.collect();

    debug!(editor = %editor, path = %tmp.path().display(), "opening editor");
    let status = Command::new(program)
        .args(&args)
        .arg(tmp.path())
        .status()
        .with_context(|| format!("failed to run editor '{editor}'"))?;

    if !status.success() {
        anyhow::bail!("editor '{editor}' exited with {status}");
    }

    fs::read_to_string(tmp.path()).context("failed to read edited file")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn preferred_editor_is_never_empty() {
        assert!(!preferred_editor().is_empty());
    }

    #[test]
    #[cfg(unix)]
    fn edit_round_trip_with_noop_editor() {
        // `true` leaves the file untouched, so the content round-trips.
        env::set_var("GIT_EDITOR", "true");
        let result = edit_with_external_editor("hello editor\n").unwrap();
        env::remove_var("GIT_EDITOR");
        assert_eq!(result, "hello editor\n");
    }
}
