use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use log::debug;

use crate::error::{Error, Result};

/// Runs an external program and hands back what it printed.
///
/// The fetcher only talks to `git` through this trait, which keeps the
/// selection logic testable without a repository.
pub trait CommandRunner {
    /// Runs `program` with `args` and returns its standard output.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be started or exits with a
    /// non-zero status.
    fn run(&self, program: &str, args: &[String]) -> Result<String>;
}

/// [`CommandRunner`] backed by real subprocesses.
///
/// Echoes each command line to stderr before it runs and a line count with
/// the elapsed time after it finishes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<String> {
        let command_line = render_command_line(program, args);
        eprintln!("$ {command_line}");

        let started = Instant::now();
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| Error::sub_process(command_line.clone(), e))?;
        let elapsed = started.elapsed();

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let line_count = stdout.lines().count();
        eprintln!("  {}", render_summary(line_count, elapsed));
        debug!("`{command_line}` produced {line_count} lines in {elapsed:?}");

        if !output.status.success() {
            return Err(Error::sub_process_exit(
                command_line,
                output.status.to_string(),
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        Ok(stdout)
    }
}

fn render_summary(line_count: usize, elapsed: Duration) -> String {
    format!("{line_count} lines in {}ms", elapsed.as_millis())
}

fn render_command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
