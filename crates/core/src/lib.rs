//! Cherry Cuts Core Library
//!
//! This crate provides the core functionality for cherry-cuts, a tool that
//! lists the commits of one branch that are not yet on another, lets the user
//! pick some of them, and generates the shell commands that cherry-pick the
//! picked commits onto a target branch.
//!
//! # Key Features
//!
//! - **Commit Fetching**: Query `git` for commits unique to a source branch and
//!   for the subset that is still cherry-pickable by patch equivalence
//! - **Selection Logic**: Cross-reference, order, group by day and filter the
//!   candidate commits
//! - **Command Building**: Produce the chained branch/cherry-pick/push/PR
//!   commands for a selection
//! - **Runner Seam**: External commands go through [`execution::CommandRunner`]
//!   so everything above is testable without a real repository
//!
//! # Examples
//!
//! Building the commands for a selection:
//!
//! ```no_run
//! use cherry_cuts_core::config::Config;
//! use cherry_cuts_core::execution::SystemRunner;
//! use cherry_cuts_core::{commands, git, selection};
//!
//! let config = Config::new("develop", "master");
//! let runner = SystemRunner;
//! let commits = git::list_commits(&runner, &config, &config.from, &config.to)?;
//! let pickable = git::list_cherry_pickable(&runner, &config, &config.from, &config.to)?;
//! let candidates = selection::candidates(&commits, &pickable)?;
//! let block = commands::build_command_block(&candidates, &config);
//! println!("{block}");
//! # Ok::<(), cherry_cuts_core::error::Error>(())
//! ```

pub mod commands;
pub mod commit;
pub mod config;
pub mod error;
pub mod execution;
pub mod git;
pub mod selection;
