//! # git-ai
//!
//! AI-assisted commit messages and branch names from your staged
//! changes.
//!
//! The interesting machinery lives in [`llm::summarize`]: diffs too
//! large for the model's context window are split per file, packed into
//! token-budget batches, summarized in parallel, and reassembled into a
//! bounded document before any commit message or branch name is
//! generated.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod git;
pub mod llm;
pub mod utils;

pub use crate::cli::Cli;

/// The current version of git-ai.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
