//! Git repository operations.

use std::sync::OnceLock;

use anyhow::{Context, Result};
use git2::{BranchType, Commit, DiffFormat, Repository};
use regex::Regex;

/// Number of recent commit subjects offered to the model for style
/// reference.
const RECENT_COMMIT_COUNT: usize = 5;

/// Number of commit subjects sampled by the conventional-commits
/// heuristic.
const CONVENTION_SAMPLE_SIZE: usize = 30;

/// Git repository wrapper.
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Opens the repository at the current directory.
    pub fn open() -> Result<Self> {
        let repo = Repository::discover(".").context("Not in a git repository")?;

        Ok(Self { repo })
    }

    /// Opens the repository at the specified path.
    pub fn open_at<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let repo = Repository::open(path).context("Failed to open git repository")?;

        Ok(Self { repo })
    }

    /// Returns the tree of HEAD, or `None` for an unborn branch.
    fn head_tree(&self) -> Option<git2::Tree<'_>> {
        self.repo.head().ok().and_then(|h| h.peel_to_tree().ok())
    }

    /// Checks whether any changes are staged for commit.
    pub fn has_staged_changes(&self) -> Result<bool> {
        let head_tree = self.head_tree();
        let diff = self
            .repo
            .diff_tree_to_index(head_tree.as_ref(), None, None)
            .context("Failed to diff index against HEAD")?;

        Ok(diff.deltas().len() > 0)
    }

    /// Returns the staged changes as unified diff text.
    pub fn staged_diff(&self) -> Result<String> {
        let head_tree = self.head_tree();
        let diff = self
            .repo
            .diff_tree_to_index(head_tree.as_ref(), None, None)
            .context("Failed to diff index against HEAD")?;

        let mut text = String::new();
        diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
            // Context/add/remove lines carry their origin marker; header
            // lines already include it in the content.
            match line.origin() {
                '+' | '-' | ' ' => text.push(line.origin()),
                _ => {}
            }
            text.push_str(&String::from_utf8_lossy(line.content()));
            true
        })
        .context("Failed to render staged diff")?;

        Ok(text)
    }

    /// Returns the paths of all staged files, newline-separated.
    pub fn staged_files(&self) -> Result<String> {
        let head_tree = self.head_tree();
        let diff = self
            .repo
            .diff_tree_to_index(head_tree.as_ref(), None, None)
            .context("Failed to diff index against HEAD")?;

        let files: Vec<String> = diff
            .deltas()
            .filter_map(|delta| {
                delta
                    .new_file()
                    .path()
                    .or_else(|| delta.old_file().path())
                    .map(|p| p.to_string_lossy().into_owned())
            })
            .collect();

        Ok(files.join("\n"))
    }

    /// Returns the subjects of the most recent commits, newest first,
    /// newline-separated. An unborn branch yields an empty string.
    pub fn recent_commit_subjects(&self) -> Result<String> {
        Ok(self
            .commit_subjects(RECENT_COMMIT_COUNT)?
            .join("\n"))
    }

    /// Collects up to `limit` commit subjects walking back from HEAD.
    fn commit_subjects(&self, limit: usize) -> Result<Vec<String>> {
        let mut revwalk = match self.repo.revwalk() {
            Ok(walk) => walk,
            Err(_) => return Ok(Vec::new()),
        };
        if revwalk.push_head().is_err() {
            // Unborn branch: no history yet.
            return Ok(Vec::new());
        }

        let mut subjects = Vec::new();
        for oid in revwalk.take(limit) {
            let oid = oid.context("Failed to walk commit history")?;
            let commit = self
                .repo
                .find_commit(oid)
                .context("Failed to load commit")?;
            subjects.push(commit.summary().unwrap_or("").to_string());
        }

        Ok(subjects)
    }

    /// Returns the names of all local branches.
    pub fn local_branches(&self) -> Result<Vec<String>> {
        self.branch_names(BranchType::Local)
    }

    /// Returns the names of all remote-tracking branches.
    pub fn remote_branches(&self) -> Result<Vec<String>> {
        self.branch_names(BranchType::Remote)
    }

    fn branch_names(&self, branch_type: BranchType) -> Result<Vec<String>> {
        let branches = self
            .repo
            .branches(Some(branch_type))
            .context("Failed to list branches")?;

        let mut names = Vec::new();
        for branch in branches {
            let (branch, _) = branch.context("Failed to read branch")?;
            if let Some(name) = branch.name().context("Branch name is not valid UTF-8")? {
                names.push(name.to_string());
            }
        }

        Ok(names)
    }

    /// Creates a commit from the index with the given message. With
    /// `amend`, rewrites the current HEAD commit instead.
    pub fn create_commit(&self, message: &str, amend: bool) -> Result<()> {
        let mut index = self.repo.index().context("Failed to open index")?;
        let tree_id = index.write_tree().context("Failed to write index tree")?;
        let tree = self
            .repo
            .find_tree(tree_id)
            .context("Failed to find index tree")?;

        if amend {
            let head = self
                .repo
                .head()
                .context("No commit to amend")?
                .peel_to_commit()
                .context("HEAD is not a commit")?;
            head.amend(Some("HEAD"), None, None, None, Some(message), Some(&tree))
                .context("Failed to amend commit")?;
        } else {
            let signature = self
                .repo
                .signature()
                .context("Failed to determine author signature; set user.name and user.email")?;
            let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
            let parents: Vec<&Commit> = parent.iter().collect();
            self.repo
                .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
                .context("Failed to create commit")?;
        }

        Ok(())
    }

    /// Creates a branch at HEAD and switches to it.
    pub fn create_branch(&self, name: &str) -> Result<()> {
        let head = self
            .repo
            .head()
            .context("Repository has no commits yet")?
            .peel_to_commit()
            .context("HEAD is not a commit")?;

        self.repo
            .branch(name, &head, false)
            .with_context(|| format!("Failed to create branch '{name}'"))?;
        self.repo
            .set_head(&format!("refs/heads/{name}"))
            .with_context(|| format!("Failed to switch to branch '{name}'"))?;

        Ok(())
    }

    /// Heuristic: does this repository already use conventional commits?
    ///
    /// Samples the last 30 commit subjects; at least half matching the
    /// conventional pattern counts as yes. Errors (e.g., a brand-new
    /// repository) count as no.
    pub fn uses_conventional_commits(&self) -> bool {
        match self.commit_subjects(CONVENTION_SAMPLE_SIZE) {
            Ok(subjects) => conventional_majority(&subjects),
            Err(_) => false,
        }
    }
}

/// Regex matching conventional commit subjects.
fn conventional_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(
            r"^(feat|fix|docs|style|refactor|perf|test|build|ci|chore|revert)(\([a-zA-Z0-9_-]+\))?: .+",
        )
        .unwrap()
    })
}

/// True when at least half of the non-empty subjects follow the
/// conventional commit format.
fn conventional_majority(subjects: &[String]) -> bool {
    let mut total = 0;
    let mut conventional = 0;

    for subject in subjects {
        if subject.is_empty() {
            continue;
        }
        total += 1;
        if conventional_pattern().is_match(subject) {
            conventional += 1;
        }
    }

    total > 0 && conventional * 100 / total >= 50
}
