//! Command-line argument parsing and validation.
//!
//! This module defines the command-line interface structure using the `clap`
//! crate. Every branch option and the page size can also be given through an
//! environment variable, which acts as the default when the flag is absent.

use clap::Parser;
use cherry_cuts_core::config::{
    Config, FilterMode, DEFAULT_FROM_BRANCH, DEFAULT_PAGE_SIZE, DEFAULT_REMOTE, DEFAULT_TO_BRANCH,
};
use cherry_cuts_core::error::Result;

/// Command-line arguments for the cherry-cuts CLI tool.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use cherry_cuts_cli::cli_args::Args;
///
/// let args = Args::parse_from(["cc-pick", "--from", "develop", "--to", "master"]);
/// let config = args.to_config()?;
/// assert_eq!(config.remote_ref(&config.to), "origin/master");
/// # Ok::<(), cherry_cuts_core::error::Error>(())
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
#[command(version, about = "Pick commits from one branch and print the commands to cherry-pick them onto another")]
pub struct Args {
    /// Branch to pick commits from.
    #[arg(long, short = 'f', env = "CHERRY_CUTS_FROM", default_value = DEFAULT_FROM_BRANCH)]
    pub from: String,

    /// Branch the commits will be cherry-picked onto.
    #[arg(long, short = 't', env = "CHERRY_CUTS_TO", default_value = DEFAULT_TO_BRANCH)]
    pub to: String,

    /// Branch used to mark commits that were already picked onto it.
    #[arg(long, short = 'i', env = "CHERRY_CUTS_INCLUDE")]
    pub include: Option<String>,

    /// Create this branch from the target branch, then push it and open a pull request.
    ///
    /// The pull request title is the branch name with every hyphen after the
    /// first turned into a space.
    #[arg(long, short = 'b')]
    pub branch: Option<String>,

    /// Remote whose tracking branches are compared.
    #[arg(long, short = 'r', env = "CHERRY_CUTS_REMOTE", default_value = DEFAULT_REMOTE)]
    pub remote: String,

    /// Maximum number of rows shown by the selection list.
    #[arg(
        long,
        env = "CHERRY_CUTS_PAGE_SIZE",
        default_value_t = DEFAULT_PAGE_SIZE,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub page_size: u16,

    /// Match the filter text fuzzily instead of as a substring.
    ///
    /// The environment variable accepts the usual yes/no spellings (`1`, `yes`, `on`, `false`...).
    #[arg(
        long,
        env = "CHERRY_CUTS_FUZZY",
        action = clap::ArgAction::SetTrue,
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub fuzzy: bool,
}

impl Args {
    /// Builds the runtime configuration from the parsed arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if a branch name is empty or contains whitespace.
    pub fn to_config(&self) -> Result<Config> {
        let config = Config {
            from: self.from.clone(),
            to: self.to.clone(),
            include: self.include.clone(),
            branch: self.branch.clone(),
            remote: self.remote.clone(),
            page_size: self.page_size,
            filter_mode: if self.fuzzy {
                FilterMode::Fuzzy
            } else {
                FilterMode::Substring
            },
        };
        config.validate()?;

        Ok(config)
    }
}
