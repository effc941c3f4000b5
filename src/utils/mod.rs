//! Utility functions and helpers.

pub mod editor;

pub use editor::{edit_with_external_editor, preferred_editor};
