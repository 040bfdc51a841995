//! The fetch, select and build pipeline behind `cc-pick`.
//!
//! The terminal list and the print/copy step are passed in as closures, so the
//! early exits can be driven without a terminal or a repository.

use chrono::TimeZone;
use indexmap::IndexSet;
use log::info;

use cherry_cuts_core::commands::build_command_block;
use cherry_cuts_core::commit::Commit;
use cherry_cuts_core::config::Config;
use cherry_cuts_core::error::Result;
use cherry_cuts_core::execution::CommandRunner;
use cherry_cuts_core::git;
use cherry_cuts_core::selection::{
    already_included, build_choices, candidates, display_order, log_order, Choice,
    SelectionOutcome,
};

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every commit on the source branch is already on the target
    NothingToPick,
    /// The user left the list without confirming
    Cancelled,
    /// The user confirmed an empty selection
    NothingSelected,
    /// The generated command block
    Commands(String),
}

/// Fetch the cherry-pickable commits in display order
pub fn fetch_candidates<R: CommandRunner>(runner: &R, config: &Config) -> Result<Vec<Commit>> {
    let commits = log_order(git::list_commits(runner, config, &config.from, &config.to)?);
    let pickable = git::list_cherry_pickable(runner, config, &config.from, &config.to)?;

    Ok(display_order(candidates(&commits, &pickable)?))
}

/// Full hashes of candidates already on the include branch, if one is configured
pub fn fetch_included<R: CommandRunner>(
    runner: &R,
    config: &Config,
    candidates: &[Commit],
) -> Result<IndexSet<String>> {
    let Some(include) = &config.include else {
        return Ok(IndexSet::new());
    };

    let pickable_to_include = git::list_cherry_pickable(runner, config, &config.from, include)?;
    Ok(already_included(candidates, &pickable_to_include))
}

/// Runs one pick session.
///
/// `select` is only called when there is something to pick, and `deliver`
/// only when the user confirmed a non-empty selection.
///
/// # Errors
///
/// Returns an error if a `git` query fails, the queries disagree, or either
/// callback fails.
pub fn run<R, Tz, S, D>(
    runner: &R,
    config: &Config,
    tz: &Tz,
    select: S,
    deliver: D,
) -> Result<RunOutcome>
where
    R: CommandRunner,
    Tz: TimeZone,
    S: FnOnce(&[Choice]) -> Result<SelectionOutcome>,
    D: FnOnce(&str) -> Result<()>,
{
    let candidates = fetch_candidates(runner, config)?;
    if candidates.is_empty() {
        return Ok(RunOutcome::NothingToPick);
    }

    let included = fetch_included(runner, config, &candidates)?;
    info!(
        "{} cherry-pickable commits, {} already included",
        candidates.len(),
        included.len()
    );

    let choices = build_choices(&candidates, &included, tz);

    let selected = match select(&choices)? {
        SelectionOutcome::Selected(selected) => selected,
        SelectionOutcome::Cancelled => return Ok(RunOutcome::Cancelled),
    };

    if selected.is_empty() {
        return Ok(RunOutcome::NothingSelected);
    }

    let block = build_command_block(&selected, config);
    deliver(&block)?;

    Ok(RunOutcome::Commands(block))
}
