//! Git operations and diff handling.

pub mod diff_split;
pub mod repository;

pub use diff_split::{split_by_file, FileDiff};
pub use repository::GitRepository;
