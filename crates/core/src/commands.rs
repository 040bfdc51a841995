//! Shell command generation for a selection of commits.
//!
//! Nothing here runs a command; the output is text for the user to paste.

use crate::commit::Commit;
use crate::config::Config;
use crate::selection::execution_order;

/// Joins the generated commands so the chain stops at the first failure.
pub const COMMAND_JOINER: &str = " && \\\n";

/// Builds the commands that apply `selection` onto the target branch.
///
/// The commits are re-sorted into execution order first. When
/// `config.branch` is set the chain starts by creating that branch from the
/// target's remote ref and ends by pushing it and opening a pull request.
#[must_use]
pub fn build_commands(selection: &[Commit], config: &Config) -> Vec<String> {
    let ordered = execution_order(selection.to_vec());
    let mut commands = Vec::with_capacity(ordered.len() + 3);

    if let Some(branch) = &config.branch {
        commands.push(format!(
            "git checkout -b {} {}",
            shell_quote(branch),
            shell_quote(&config.remote_ref(&config.to))
        ));
    }

    commands.extend(
        ordered
            .iter()
            .map(|commit| format!("git cherry-pick {}", commit.full_hash)),
    );

    if let Some(branch) = &config.branch {
        commands.push(format!(
            "git push -u {} {}",
            shell_quote(&config.remote),
            shell_quote(branch)
        ));
        commands.push(format!(
            "gh pr create --title {} --body '' --base {} --head {} --assignee @me",
            shell_quote(&branch_to_title(branch)),
            shell_quote(&config.to),
            shell_quote(branch)
        ));
    }

    commands
}

/// [`build_commands`] joined into a single short-circuiting shell chain.
#[must_use]
pub fn build_command_block(selection: &[Commit], config: &Config) -> String {
    build_commands(selection, config).join(COMMAND_JOINER)
}

/// Turns a branch name into a pull request title.
///
/// The first hyphen is kept, every later one becomes a space, so a ticket
/// prefix like `HRIS-123` survives intact.
///
/// # Examples
///
/// ```
/// use cherry_cuts_core::commands::branch_to_title;
///
/// assert_eq!(branch_to_title("HRIS-123-CP-PROD"), "HRIS-123 CP PROD");
/// ```
#[must_use]
pub fn branch_to_title(branch: &str) -> String {
    match branch.split_once('-') {
        Some((prefix, rest)) => format!("{prefix}-{}", rest.replace('-', " ")),
        None => branch.to_string(),
    }
}

/// Quotes `value` for a POSIX shell unless it only has safe characters.
#[must_use]
pub fn shell_quote(value: &str) -> String {
    let is_safe = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./@:+=,".contains(c));

    if is_safe {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}
