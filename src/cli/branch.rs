//! `git-ai branch`: generate a branch name and create the branch.

use std::io::Write as _;

use anyhow::Result;
use clap::Args;
use tracing::warn;

use crate::config::Config;
use crate::git::GitRepository;
use crate::llm::{generate_branch_name, LlmClient};

/// Generate a branch name from a description and create the branch.
#[derive(Args, Debug)]
pub struct BranchCommand {
    /// Description of the work the branch is for
    #[arg(required = true)]
    pub description: Vec<String>,

    /// Include the staged diff as context for the name
    #[arg(long = "from-diff")]
    pub from_diff: bool,

    /// Create the branch without prompting
    #[arg(long)]
    pub auto: bool,
}

impl BranchCommand {
    /// Executes the branch command.
    pub async fn execute(self) -> Result<()> {
        let config = Config::load()?;
        let repo = GitRepository::open()?;
        let description = self.description.join(" ");

        let diff = if self.from_diff {
            repo.staged_diff()?
        } else {
            String::new()
        };

        // Branch listings are context, not a requirement.
        let local_branches = repo.local_branches().unwrap_or_else(|e| {
            warn!(error = %e, "failed to list local branches");
            Vec::new()
        });
        let remote_branches = repo.remote_branches().unwrap_or_else(|e| {
            warn!(error = %e, "failed to list remote branches");
            Vec::new()
        });

        let client = LlmClient::from_config(&config)?;

        println!("Generating branch name...");
        let mut name = generate_branch_name(
            &client,
            &description,
            &local_branches,
            &remote_branches,
            &diff,
        )
        .await?;

        if name.is_empty() {
            anyhow::bail!("The model returned an unusable branch name.");
        }

        if !self.auto && !self.confirm_or_edit(&mut name)? {
            println!("Branch creation cancelled.");
            return Ok(());
        }

        repo.create_branch(&name)?;
        println!("Branch '{name}' created successfully!");
        Ok(())
    }

    /// Shows the name and lets the user accept, edit, print, or quit.
    /// Returns false when the user cancels (printing also stops here).
    fn confirm_or_edit(&self, name: &mut String) -> Result<bool> {
        loop {
            println!("\nGenerated branch name: {name}");
            print!("[C]reate, [e]dit, [p]rint only, or [q]uit? [C/e/p/q] ");
            std::io::stdout().flush()?;

            let mut input = String::new();
            std::io::stdin().read_line(&mut input)?;
            match input.trim().to_lowercase().as_str() {
                "c" | "create" | "" => return Ok(true),
                "e" | "edit" => {
                    print!("Edit branch name [{name}]: ");
                    std::io::stdout().flush()?;
                    let mut edited = String::new();
                    std::io::stdin().read_line(&mut edited)?;
                    let edited = edited.trim();
                    if !edited.is_empty() {
                        *name = edited.to_string();
                    }
                }
                "p" | "print" => {
                    println!("{name}");
                    return Ok(false);
                }
                "q" | "quit" => return Ok(false),
                _ => println!("Please answer c, e, p, or q."),
            }
        }
    }
}
