//! Application error types using thiserror
//!
//! Error hierarchy:
//! - CommandError: Package manager invocation failures
//! - ScanError: Unreadable `npm outdated` output
//! - SnapshotError: Snapshot file operation failures
//! - SelectionError: Malformed id selection
//! - ConfigError: Missing or conflicting phase flags
//! - Output: Console write failures

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Package manager command errors
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Outdated scan parsing errors
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Snapshot file errors
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// User selection errors
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Failed to write to the console
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl AppError {
    /// Captured diagnostic stream of a failed command, if any
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            AppError::Command(CommandError::Failed { stderr, .. }) if !stderr.is_empty() => {
                Some(stderr)
            }
            AppError::Scan(ScanError::Reported { detail, .. }) if !detail.is_empty() => {
                Some(detail)
            }
            _ => None,
        }
    }
}

/// Errors related to running the package manager
#[derive(Error, Debug)]
pub enum CommandError {
    /// The executable could not be started
    #[error("failed to run '{command}': {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The command exited unsuccessfully
    #[error("{command} command failed with exit code {}", display_code(.code))]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn display_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "none (terminated by signal)".to_string(), |c| c.to_string())
}

/// Errors related to interpreting `npm outdated` output
#[derive(Error, Debug)]
pub enum ScanError {
    /// Output was not the expected JSON mapping
    #[error("failed to parse outdated output: {message}")]
    InvalidOutput { message: String },

    /// npm printed its own JSON error object instead of the mapping
    #[error("npm reported an error ({code}): {summary}")]
    Reported {
        code: String,
        summary: String,
        detail: String,
    },
}

/// Errors related to the snapshot file
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// No snapshot has been written
    #[error("snapshot file not found: {path} (run with --check first)")]
    Missing { path: PathBuf },

    /// Failed to read snapshot file
    #[error("failed to read snapshot file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write snapshot file
    #[error("failed to write snapshot file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot contents are not valid JSON records
    #[error("failed to parse snapshot file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Records could not be serialized
    #[error("failed to serialize snapshot: {message}")]
    Serialize { message: String },

    /// Failed to remove snapshot file
    #[error("failed to remove snapshot file {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to command-line configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Neither phase was requested
    #[error("Is necessary to specify one of the arguments (--check or --update)")]
    MissingMode,

    /// Both phases were requested
    #[error("Only one argument can be specified (--check or --update)")]
    ConflictingModes,
}

/// Errors related to the `--update` id list
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    /// Input is not a comma separated list of non-negative integers
    #[error("the update string must be a comma separated list of IDs (e.g. 1,2,3), got '{input}'")]
    Malformed { input: String },

    /// An id does not fit in the platform integer size
    #[error("id '{value}' is too large")]
    Overflow { value: String },
}

impl CommandError {
    /// Creates a new Launch error
    pub fn launch(command: impl Into<String>, source: std::io::Error) -> Self {
        CommandError::Launch {
            command: command.into(),
            source,
        }
    }

    /// Creates a new Failed error
    pub fn failed(
        command: impl Into<String>,
        code: Option<i32>,
        stderr: impl Into<String>,
    ) -> Self {
        CommandError::Failed {
            command: command.into(),
            code,
            stderr: stderr.into(),
        }
    }
}

impl ScanError {
    /// Creates a new InvalidOutput error
    pub fn invalid_output(message: impl Into<String>) -> Self {
        ScanError::InvalidOutput {
            message: message.into(),
        }
    }

    /// Creates a new Reported error
    pub fn reported(
        code: impl Into<String>,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        ScanError::Reported {
            code: code.into(),
            summary: summary.into(),
            detail: detail.into(),
        }
    }
}

impl SnapshotError {
    /// Creates a new Missing error
    pub fn missing(path: impl Into<PathBuf>) -> Self {
        SnapshotError::Missing { path: path.into() }
    }

    /// Creates a new Read error
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SnapshotError::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a new Write error
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SnapshotError::Write {
            path: path.into(),
            source,
        }
    }

    /// Creates a new Parse error
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        SnapshotError::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new Remove error
    pub fn remove(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SnapshotError::Remove {
            path: path.into(),
            source,
        }
    }
}
