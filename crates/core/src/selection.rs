//! Commit selection logic.
//!
//! Commits go through three orderings on their way to the generated
//! commands, each produced by its own function:
//!
//! - [`log_order`]: as `git log` printed them, newest first
//! - [`display_order`]: oldest first, the way the selection list reads
//! - [`execution_order`]: ascending by timestamp, the order the
//!   cherry-picks are applied in, whatever order the user picked them in
//!
//! The rest of the module turns display-ordered commits into selectable
//! [`Choice`]s with day separators, labels and search keys, and filters them.

use std::fmt::{Display, Formatter};

use chrono::{NaiveDate, TimeZone};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use indexmap::IndexSet;
use log::debug;

use crate::commit::Commit;
use crate::config::FilterMode;
use crate::error::{Error, Result};

/// Maximum number of characters of a subject shown in a label
pub const SUBJECT_WIDTH: usize = 80;
/// Maximum number of characters of an author name shown in a label
pub const AUTHOR_WIDTH: usize = 20;

const INCLUDED_MARKER: char = '✓';
const ELLIPSIS: char = '…';

/// Result of the interactive selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Commits in the order the user picked them
    Selected(Vec<Commit>),
    Cancelled,
}

/// Keeps the commits whose full hash is cherry-pickable, in log order.
///
/// # Errors
///
/// Returns [`Error::InconsistentBranchState`] for the first cherry-pickable
/// hash that has no commit record.
pub fn candidates(commits: &[Commit], cherry_pickable: &IndexSet<String>) -> Result<Vec<Commit>> {
    if let Some(missing) = cherry_pickable
        .iter()
        .find(|hash| !commits.iter().any(|commit| &commit.full_hash == *hash))
    {
        return Err(Error::inconsistent_branch_state(missing.clone()));
    }

    let candidates: Vec<Commit> = commits
        .iter()
        .filter(|commit| cherry_pickable.contains(&commit.full_hash))
        .cloned()
        .collect();
    debug!(
        "{} of {} commits are cherry-pickable",
        candidates.len(),
        commits.len()
    );

    Ok(candidates)
}

/// Full hashes of the commits that are already on the include branch.
///
/// `pickable_to_include` is the cherry-pickable set of the source branch
/// relative to the include branch; a candidate outside it has been applied
/// there already.
#[must_use]
pub fn already_included(
    candidates: &[Commit],
    pickable_to_include: &IndexSet<String>,
) -> IndexSet<String> {
    candidates
        .iter()
        .filter(|commit| !pickable_to_include.contains(&commit.full_hash))
        .map(|commit| commit.full_hash.clone())
        .collect()
}

/// Commits exactly as `git log` listed them, newest first.
#[must_use]
pub fn log_order(commits: Vec<Commit>) -> Vec<Commit> {
    commits
}

/// Reverses log order so the list reads oldest to newest.
#[must_use]
pub fn display_order(mut commits: Vec<Commit>) -> Vec<Commit> {
    commits.reverse();
    commits
}

/// Sorts commits ascending by timestamp. Ties keep their relative order.
#[must_use]
pub fn execution_order(mut commits: Vec<Commit>) -> Vec<Commit> {
    commits.sort_by_key(|commit| commit.timestamp_millis);
    commits
}

/// A commit entry of the selection list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitChoice {
    pub commit: Commit,
    pub label: String,
    pub search_key: String,
    /// Whether the commit is already on the include branch
    pub included: bool,
}

impl CommitChoice {
    #[must_use]
    pub fn new(commit: Commit, included: bool) -> Self {
        let label = commit_label(&commit, included);
        let search_key = search_key(&commit);
        Self {
            commit,
            label,
            search_key,
            included,
        }
    }
}

/// An entry of the selection list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// Marks the first commit of a new calendar day
    Separator(NaiveDate),
    Commit(CommitChoice),
}

impl Choice {
    #[must_use]
    pub fn is_separator(&self) -> bool {
        matches!(self, Choice::Separator(_))
    }
}

impl Display for Choice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Choice::Separator(date) => write!(f, "── {} ──", date.format("%a %Y-%m-%d")),
            Choice::Commit(choice) => f.write_str(&choice.label),
        }
    }
}

/// Builds the selection list from display-ordered commits.
///
/// A separator is inserted wherever the calendar day in `tz` changes between
/// two consecutive commits.
pub fn build_choices<Tz: TimeZone>(
    commits: &[Commit],
    included: &IndexSet<String>,
    tz: &Tz,
) -> Vec<Choice> {
    let mut choices = Vec::with_capacity(commits.len());
    let mut previous_day: Option<NaiveDate> = None;

    for commit in commits {
        let day = commit.time_in(tz).map(|time| time.date_naive());

        if let (Some(previous), Some(current)) = (previous_day, day) {
            if previous != current {
                choices.push(Choice::Separator(current));
            }
        }
        if day.is_some() {
            previous_day = day;
        }

        let is_included = included.contains(&commit.full_hash);
        choices.push(Choice::Commit(CommitChoice::new(commit.clone(), is_included)));
    }

    choices
}

/// Indexes of the choices to show for `filter`.
///
/// Commits are shown when their search key matches. A separator is shown only
/// if at least one shown commit follows it before the next separator.
#[must_use]
pub fn visible_choices(choices: &[Choice], filter: &str, mode: FilterMode) -> Vec<usize> {
    let needle = normalize(filter);
    let matcher = SkimMatcherV2::default();

    let mut visible = Vec::with_capacity(choices.len());
    let mut pending_separator: Option<usize> = None;

    for (index, choice) in choices.iter().enumerate() {
        match choice {
            Choice::Separator(_) => pending_separator = Some(index),
            Choice::Commit(commit_choice) => {
                if !matches_filter(&matcher, &commit_choice.search_key, &needle, mode) {
                    continue;
                }
                if let Some(separator) = pending_separator.take() {
                    visible.push(separator);
                }
                visible.push(index);
            }
        }
    }

    visible
}

fn matches_filter(matcher: &SkimMatcherV2, key: &str, needle: &str, mode: FilterMode) -> bool {
    if needle.is_empty() {
        return true;
    }

    match mode {
        FilterMode::Substring => key.contains(needle),
        FilterMode::Fuzzy => matcher.fuzzy_match(key, needle).is_some(),
    }
}

/// Display label: include marker, short hash, subject and author.
#[must_use]
pub fn commit_label(commit: &Commit, included: bool) -> String {
    let marker = if included { INCLUDED_MARKER } else { ' ' };
    format!(
        "{marker} {} {} ({})",
        commit.short_hash,
        truncate(&commit.subject, SUBJECT_WIDTH),
        truncate(&commit.author_name, AUTHOR_WIDTH)
    )
}

/// Normalized short hash, subject and author, matched against the filter.
#[must_use]
pub fn search_key(commit: &Commit) -> String {
    normalize(&format!(
        "{}{}{}",
        commit.short_hash, commit.subject, commit.author_name
    ))
}

/// Lowercases and strips everything that is not a word character.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Shortens `text` to at most `width` characters, ending in an ellipsis when cut.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }

    let mut truncated: String = text.chars().take(width.saturating_sub(1)).collect();
    truncated.push(ELLIPSIS);
    truncated
}
