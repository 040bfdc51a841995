use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("`{}` exited with {}: {}", .command, .status, .stderr)]
    SubProcessExit {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Could not start `{}`: {}", .command, .original)]
    SubProcess {
        command: String,
        original: std::io::Error,
    },

    #[error(
        "Inconsistent branch state: cherry-pickable commit `{}` is missing from the log. \
         Did a branch move between queries?",
        .hash
    )]
    InconsistentBranchState { hash: String },

    #[error("Could not parse log line: `{}`", .0)]
    MalformedLogLine(String),

    #[error("Invalid branch name `{}`: name may not be empty or contain whitespace", .0)]
    InvalidBranchName(String),

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),
}

impl Error {
    pub fn sub_process_exit(command: String, status: String, stderr: String) -> Self {
        Self::SubProcessExit {
            command,
            status,
            stderr,
        }
    }

    pub fn sub_process(command: String, original: std::io::Error) -> Self {
        Self::SubProcess { command, original }
    }

    pub fn inconsistent_branch_state(hash: String) -> Self {
        Self::InconsistentBranchState { hash }
    }
}
