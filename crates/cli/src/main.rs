use chrono::Local;
use clap::Parser;
use log::debug;
use std::process::ExitCode;

use cherry_cuts_cli::cli_args::Args;
use cherry_cuts_cli::clipboard::copy_to_clipboard;
use cherry_cuts_cli::command_selection::{confirm_copy_to_clipboard, prompt_for_commits};
use cherry_cuts_cli::pipeline::{run, RunOutcome};
use cherry_cuts_core::error::Result;
use cherry_cuts_core::execution::SystemRunner;

fn print_and_copy(block: &str) -> Result<()> {
    println!("{block}");

    if !confirm_copy_to_clipboard()? {
        return Ok(());
    }

    if copy_to_clipboard(block) {
        println!("Copied to clipboard.");
    } else {
        println!("Could not copy to clipboard.");
    }

    Ok(())
}

fn execute() -> Result<()> {
    let args = Args::parse();
    let config = args.to_config()?;
    debug!("Config: {config:?}");

    let outcome = run(
        &SystemRunner,
        &config,
        &Local,
        |choices| prompt_for_commits(choices, &config),
        print_and_copy,
    )?;

    match outcome {
        RunOutcome::NothingToPick => println!(
            "Nothing to cherry-pick: every commit on {} is already on {}.",
            config.remote_ref(&config.from),
            config.remote_ref(&config.to)
        ),
        RunOutcome::Cancelled => println!("Selection cancelled, nothing to do."),
        RunOutcome::NothingSelected => println!("No commits selected, nothing to do."),
        RunOutcome::Commands(_) => {}
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
