//! Per-file unified diff splitting.

/// Marker that begins a per-file section in unified diff output.
const FILE_DIFF_MARKER: &str = "diff --git";

/// A per-file slice of a unified diff.
#[derive(Debug, Clone)]
pub struct FileDiff {
    /// Path of the changed file. Best-effort: empty when no path could be
    /// extracted from the section headers (e.g., malformed output).
    pub path: String,
    /// Raw text of this file's diff, header lines included.
    pub content: String,
}

/// Splits a flat unified diff at `diff --git` boundaries.
///
/// Returns one [`FileDiff`] per file section, in input order. Sections
/// whose path cannot be determined are still emitted with an empty path.
/// Input without any section markers returns an empty `Vec`, signalling
/// the caller to treat the document as unsplittable.
pub fn split_by_file(diff: &str) -> Vec<FileDiff> {
    let mut positions = Vec::new();

    // Find all positions where a file section starts (at line boundaries).
    if diff.starts_with(FILE_DIFF_MARKER) {
        positions.push(0);
    }
    let search = format!("\n{FILE_DIFF_MARKER}");
    let mut start = 0;
    while let Some(pos) = diff[start..].find(&search) {
        // +1 to skip the newline; the section starts at `diff`.
        positions.push(start + pos + 1);
        start = start + pos + 1;
    }

    positions
        .iter()
        .enumerate()
        .map(|(i, &pos)| {
            let end = positions.get(i + 1).copied().unwrap_or(diff.len());
            let content = &diff[pos..end];

            FileDiff {
                path: extract_path(content),
                content: content.to_string(),
            }
        })
        .collect()
}

/// Extracts the file path from a single file section.
///
/// Prefers the `+++ b/<path>` line, then a bare `+++ <path>` line that is
/// not `/dev/null` (deleted files), and finally falls back to the `b/`
/// token of the `diff --git a/... b/...` header. Binary and mode-only
/// sections have no `+++` line and rely on the header fallback.
fn extract_path(section: &str) -> String {
    for line in section.lines() {
        if let Some(path) = line.strip_prefix("+++ b/") {
            return path.to_string();
        }
        if let Some(path) = line.strip_prefix("+++ ") {
            if !path.contains("/dev/null") {
                return path.to_string();
            }
        }
    }

    if let Some(header) = section.lines().next() {
        if header.starts_with("diff --git a/") {
            let fields: Vec<&str> = header.split_whitespace().collect();
            if fields.len() >= 4 {
                return fields[3].strip_prefix("b/").unwrap_or(fields[3]).to_string();
            }
        }
    }

    String::new()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    // ── test helpers ────────────────────────────────────────────

    /// Builds a standard single-file diff header.
    fn make_file_header(path: &str) -> String {
        format!(
            "diff --git a/{path} b/{path}\n\
             index abc1234..def5678 100644\n\
             --- a/{path}\n\
             +++ b/{path}\n"
        )
    }

    /// Builds a complete single-file, single-hunk diff.
    fn make_single_file_diff(path: &str, hunk_body: &str) -> String {
        format!("{}@@ -1,3 +1,4 @@\n{hunk_body}", make_file_header(path))
    }

    // ── split_by_file ──────────────────────────────────────────

    #[test]
    fn split_by_file_empty_input() {
        assert!(split_by_file("").is_empty());
    }

    #[test]
    fn split_by_file_no_diff_markers() {
        let result = split_by_file("some random text\nwithout diff markers\n");
        assert!(result.is_empty());
    }

    #[test]
    fn split_by_file_single_file() {
        let diff = make_single_file_diff(
            "src/main.rs",
            " fn main() {\n+    println!(\"hello\");\n }\n",
        );
        let result = split_by_file(&diff);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].path, "src/main.rs");
        assert_eq!(result[0].content, diff);
    }

    #[test]
    fn split_by_file_multiple_files_in_order() {
        let file1 = make_single_file_diff("a.rs", "+line\n");
        let file2 = make_single_file_diff("b.rs", "+other\n");
        let file3 = make_single_file_diff("c.rs", "+third\n");
        let diff = format!("{file1}{file2}{file3}");

        let result = split_by_file(&diff);
        assert_eq!(result.len(), 3);
        assert_eq!(result[0].path, "a.rs");
        assert_eq!(result[1].path, "b.rs");
        assert_eq!(result[2].path, "c.rs");
    }

    #[test]
    fn split_by_file_content_preserved_verbatim() {
        let file1 = make_single_file_diff("a.rs", "+line\n");
        let file2 = make_single_file_diff("b.rs", "+other\n");
        let diff = format!("{file1}{file2}");

        let result = split_by_file(&diff);
        let rejoined: String = result.iter().map(|f| f.content.as_str()).collect();
        assert_eq!(rejoined, diff);
    }

    #[test]
    fn split_by_file_binary_section_uses_header_path() {
        let diff = "diff --git a/image.png b/image.png\n\
                     new file mode 100644\n\
                     index 0000000..abc1234\n\
                     Binary files /dev/null and b/image.png differ\n";

        let result = split_by_file(diff);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].path, "image.png");
        assert!(result[0].content.contains("Binary files"));
    }

    #[test]
    fn split_by_file_deleted_file_skips_dev_null() {
        let diff = "diff --git a/gone.rs b/gone.rs\n\
                     deleted file mode 100644\n\
                     index abc1234..0000000\n\
                     --- a/gone.rs\n\
                     +++ /dev/null\n\
                     @@ -1,2 +0,0 @@\n\
                     -fn gone() {}\n\
                     -\n";

        let result = split_by_file(diff);
        assert_eq!(result.len(), 1);
        // `+++ /dev/null` is skipped; the header fallback supplies the path.
        assert_eq!(result[0].path, "gone.rs");
    }

    #[test]
    fn split_by_file_rename_takes_new_path() {
        let diff = "diff --git a/old_name.rs b/new_name.rs\n\
                     similarity index 95%\n\
                     rename from old_name.rs\n\
                     rename to new_name.rs\n\
                     index abc1234..def5678 100644\n\
                     --- a/old_name.rs\n\
                     +++ b/new_name.rs\n\
                     @@ -1,3 +1,3 @@\n\
                     -// old\n\
                     +// new\n";

        let result = split_by_file(diff);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].path, "new_name.rs");
    }

    #[test]
    fn split_by_file_unparseable_section_gets_empty_path() {
        let diff = "diff --git\nsomething unexpected\n";
        let result = split_by_file(diff);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].path, "");
    }

    // ── extract_path ───────────────────────────────────────────

    #[test]
    fn path_extraction_prefers_new_file_line() {
        let section = "diff --git a/x.rs b/x.rs\n--- a/x.rs\n+++ b/x.rs\n@@ -1 +1 @@\n";
        assert_eq!(extract_path(section), "x.rs");
    }

    #[test]
    fn path_extraction_bare_new_file_line() {
        let section = "diff --git a/x.rs b/x.rs\n--- a/x.rs\n+++ x.rs\n";
        assert_eq!(extract_path(section), "x.rs");
    }

    #[test]
    fn path_extraction_header_fallback_nested() {
        let section = "diff --git a/src/git/diff.rs b/src/git/diff.rs\nindex 123..456\n";
        assert_eq!(extract_path(section), "src/git/diff.rs");
    }
}
