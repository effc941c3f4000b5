//! CLI interface for git-ai.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod branch;
pub mod commit;
pub mod config;

/// git-ai: AI-assisted commit messages and branch names
#[derive(Parser)]
#[command(name = "git-ai")]
#[command(about = "AI-assisted commit messages and branch names", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The main command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Main command categories
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a commit message from staged changes and commit
    Commit(commit::CommitCommand),
    /// Generate a branch name from a description and create the branch
    Branch(branch::BranchCommand),
    /// Show or update the LLM configuration
    Config(config::ConfigCommand),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Commit(cmd) => cmd.execute().await,
            Commands::Branch(cmd) => cmd.execute().await,
            Commands::Config(cmd) => cmd.execute(),
        }
    }
}
