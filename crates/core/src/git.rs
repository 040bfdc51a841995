//! Commit fetching.
//!
//! Both queries compare the remote-tracking refs of two branches. The commit
//! list and the cherry-pickable set come from separate `git` invocations, so
//! callers must cross-check them (see [`crate::selection::candidates`]).

use indexmap::IndexSet;
use log::debug;

use crate::commit::Commit;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::execution::CommandRunner;

/// Separates the fields of a `git log` line. Commit subjects never contain it.
pub const FIELD_SEPARATOR: char = '\u{1f}';

/// `git log` format producing `FIELD_SEPARATOR`-delimited
/// `author time, short hash, full hash, author name, subject` lines.
const LOG_FORMAT: &str = "--format=%at%x1f%h%x1f%H%x1f%an%x1f%s";

/// Lists the full hashes of commits on `source` whose patches are not yet on
/// `dest`, in the order `git cherry` reports them (oldest first).
///
/// # Errors
///
/// Returns an error if `git cherry` fails, e.g. because a branch is unknown.
pub fn list_cherry_pickable<R: CommandRunner>(
    runner: &R,
    config: &Config,
    source: &str,
    dest: &str,
) -> Result<IndexSet<String>> {
    let args = vec![
        "cherry".to_string(),
        config.remote_ref(dest),
        config.remote_ref(source),
    ];
    let output = runner.run("git", &args)?;

    let pickable = parse_cherry_output(&output);
    debug!("{} cherry-pickable commits from {source} to {dest}", pickable.len());

    Ok(pickable)
}

/// Lists commits reachable from `source` but not from `dest`, newest first.
///
/// # Errors
///
/// Returns an error if `git log` fails or prints a line that does not have
/// the expected fields.
pub fn list_commits<R: CommandRunner>(
    runner: &R,
    config: &Config,
    source: &str,
    dest: &str,
) -> Result<Vec<Commit>> {
    let args = vec![
        "log".to_string(),
        LOG_FORMAT.to_string(),
        format!("{}..{}", config.remote_ref(dest), config.remote_ref(source)),
    ];
    let output = runner.run("git", &args)?;

    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| parse_log_line(line, source))
        .collect()
}

fn parse_cherry_output(output: &str) -> IndexSet<String> {
    output
        .lines()
        .filter_map(|line| line.trim().strip_prefix("+ "))
        .map(|hash| hash.trim().to_string())
        .collect()
}

fn parse_log_line(line: &str, source_branch: &str) -> Result<Commit> {
    let fields: Vec<&str> = line.splitn(5, FIELD_SEPARATOR).collect();
    let [timestamp, short_hash, full_hash, author_name, subject] = fields[..] else {
        return Err(Error::MalformedLogLine(line.to_string()));
    };

    let seconds: i64 = timestamp
        .trim()
        .parse()
        .map_err(|_| Error::MalformedLogLine(line.to_string()))?;
    let timestamp_millis = seconds
        .checked_mul(1000)
        .ok_or_else(|| Error::MalformedLogLine(line.to_string()))?;

    Ok(Commit {
        source_branch: source_branch.to_string(),
        timestamp_millis,
        short_hash: short_hash.to_string(),
        full_hash: full_hash.to_string(),
        author_name: author_name.to_string(),
        subject: subject.to_string(),
    })
}
