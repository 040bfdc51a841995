//! Interactive commit selection and user input handling.
//!
//! This module provides the terminal-based user interface for cherry-cuts:
//! the multi-select commit list and the clipboard confirmation prompt.
//!
//! # Key Features
//!
//! - **Commit List**: Scrollable list of candidate commits grouped by day
//! - **Incremental Filter**: Narrow the list by typing after `/`
//! - **Multi-select**: Tick any number of commits, in any order
//! - **Keyboard Navigation**: Full keyboard control with mouse support
//!
//! # User Interface
//!
//! The interface supports:
//! - Arrow keys or the mouse wheel to move between commits
//! - Space (or a click) to tick or untick a commit
//! - Enter to finish the selection
//! - '/' to start filtering, Escape to clear the filter
//! - 'q', Escape or Ctrl-C to quit without selecting

// Export public items from submodules
pub mod input;
pub mod types;
pub mod ui;

// Re-exports for convenience
pub use input::confirm_copy_to_clipboard;
pub use ui::prompt_for_commits;
