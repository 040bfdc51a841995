//! Runtime configuration for cherry-cuts.
//!
//! A [`Config`] is built once at startup from the command line (and the
//! environment variables backing its defaults) and then passed by reference
//! into the fetch, selection and command-building functions.

use crate::error::{Error, Result};

/// Default remote whose tracking refs are compared
pub const DEFAULT_REMOTE: &str = "origin";
/// Default branch commits are picked from
pub const DEFAULT_FROM_BRANCH: &str = "develop";
/// Default branch commits are picked onto
pub const DEFAULT_TO_BRANCH: &str = "master";
/// Default number of rows shown by the selection list
pub const DEFAULT_PAGE_SIZE: u16 = 20;

/// How the filter text is matched against a commit's search key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FilterMode {
    #[default]
    Substring,
    Fuzzy,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Branch holding the commits to pick
    pub from: String,
    /// Branch the commits are picked onto
    pub to: String,
    /// Branch used to mark commits that were already picked elsewhere
    pub include: Option<String>,
    /// Name of the local branch to create, if any
    pub branch: Option<String>,
    pub remote: String,
    pub page_size: u16,
    pub filter_mode: FilterMode,
}

impl Config {
    #[must_use]
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            include: None,
            branch: None,
            remote: DEFAULT_REMOTE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            filter_mode: FilterMode::default(),
        }
    }

    /// Resolves a branch name to its remote-tracking ref.
    ///
    /// # Examples
    ///
    /// ```
    /// use cherry_cuts_core::config::Config;
    ///
    /// let config = Config::new("develop", "master");
    /// assert_eq!(config.remote_ref("master"), "origin/master");
    /// ```
    #[must_use]
    pub fn remote_ref(&self, branch: &str) -> String {
        format!("{}/{}", self.remote, branch)
    }

    /// Checks the branch names that end up in generated shell commands.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBranchName`] if any branch name is empty or
    /// contains whitespace.
    pub fn validate(&self) -> Result<()> {
        let names = [
            Some(&self.from),
            Some(&self.to),
            self.include.as_ref(),
            self.branch.as_ref(),
        ]
        .into_iter()
        .flatten();

        for name in names {
            if name.is_empty() || name.chars().any(char::is_whitespace) {
                return Err(Error::InvalidBranchName(name.clone()));
            }
        }

        Ok(())
    }
}
