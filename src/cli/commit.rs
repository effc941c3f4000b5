//! `git-ai commit`: generate a commit message for staged changes.

use std::io::Write as _;

use anyhow::Result;
use clap::Args;

use crate::config::Config;
use crate::git::GitRepository;
use crate::llm::{generate_commit_message, CommitMessageOptions, LlmClient};
use crate::utils::edit_with_external_editor;

/// Generate an AI commit message based on staged changes.
#[derive(Args, Debug)]
pub struct CommitCommand {
    /// Commit with the generated message without prompting
    #[arg(long)]
    pub auto: bool,

    /// Use conventional commit format (type(scope): description)
    #[arg(long)]
    pub conventional: bool,

    /// Don't use conventional commit format
    #[arg(long = "no-conventional", conflicts_with = "conventional")]
    pub no_conventional: bool,

    /// Generate a message body in addition to the subject line
    #[arg(long = "with-descriptions")]
    pub with_descriptions: bool,

    /// Amend the previous commit instead of creating a new one
    #[arg(short, long)]
    pub amend: bool,
}

impl CommitCommand {
    /// Executes the commit command.
    pub async fn execute(self) -> Result<()> {
        let config = Config::load()?;
        let repo = GitRepository::open()?;

        if !repo.has_staged_changes()? {
            if self.amend {
                println!("No staged changes found. Will amend the previous commit message only.");
            } else {
                anyhow::bail!(
                    "No staged changes found. Please stage your changes with 'git add' first."
                );
            }
        }

        let diff = repo.staged_diff()?;
        let changed_files = repo.staged_files()?;
        let recent_commits = repo.recent_commit_subjects()?;

        let options = CommitMessageOptions {
            conventional: self.should_use_conventional(&repo),
            with_description: self.with_descriptions,
        };

        let client = LlmClient::from_config(&config)?;

        println!("Generating commit message...");
        let mut message =
            generate_commit_message(&client, &diff, &changed_files, &recent_commits, options)
                .await?;

        if !self.auto && !self.confirm_or_edit(&mut message)? {
            println!("Commit cancelled.");
            return Ok(());
        }

        repo.create_commit(&message, self.amend)?;

        if self.amend {
            println!("Commit amended successfully!");
        } else {
            println!("Commit created successfully!");
        }
        Ok(())
    }

    /// Flags win; otherwise fall back to the repository history
    /// heuristic.
    fn should_use_conventional(&self, repo: &GitRepository) -> bool {
        if self.conventional {
            return true;
        }
        if self.no_conventional {
            return false;
        }
        repo.uses_conventional_commits()
    }

    /// Shows the message and lets the user accept, edit, or quit.
    /// Returns false when the user cancels.
    fn confirm_or_edit(&self, message: &mut String) -> Result<bool> {
        loop {
            println!("\n── Generated commit message ──\n{message}\n──────────────────────────────");
            print!("[C]ommit, [e]dit, or [q]uit? [C/e/q] ");
            std::io::stdout().flush()?;

            let mut input = String::new();
            std::io::stdin().read_line(&mut input)?;
            match input.trim().to_lowercase().as_str() {
                "c" | "commit" | "" => return Ok(true),
                "e" | "edit" => {
                    let edited = edit_with_external_editor(message)?;
                    let edited = edited.trim();
                    if edited.is_empty() {
                        println!("Message is empty, keeping the previous one.");
                    } else {
                        *message = edited.to_string();
                    }
                }
                "q" | "quit" => return Ok(false),
                _ => println!("Please answer c, e, or q."),
            }
        }
    }
}
