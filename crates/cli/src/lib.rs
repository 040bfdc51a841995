//! Cherry Cuts CLI Library
//!
//! This crate provides the command-line interface for cherry-cuts. It parses
//! the branch options, drives the interactive commit selection, and prints
//! (and optionally copies) the generated cherry-pick commands.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing and validation
//! - [`command_selection`]: Interactive commit list and confirmation prompt
//! - [`clipboard`]: Best-effort clipboard sink
//! - [`pipeline`]: Fetch, select and build, with the terminal parts injected
//!
//! # Examples
//!
//! ```bash
//! # Pick from origin/develop onto origin/master
//! cc-pick
//!
//! # Mark commits already on origin/release, pick onto origin/main
//! cc-pick --from develop --to main --include release
//!
//! # Also create a branch, push it and open a pull request
//! cc-pick -t main -b HRIS-123-CP-PROD
//! ```

pub mod cli_args;
pub mod clipboard;
pub mod command_selection;
pub mod pipeline;
