//! Package manager integration
//!
//! This module provides:
//! - The npm commands used by the scan and update phases
//! - Exit status interpretation per command
//! - A runner trait so the workflow can be driven without a real npm

use crate::domain::OutdatedDependency;
use crate::error::CommandError;
use std::path::PathBuf;
use std::process::Command;

/// Default package manager executable
pub const DEFAULT_PROGRAM: &str = "npm";

/// How a non-zero exit status is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitPolicy {
    /// Non-zero exit with output is a normal result carrying data
    /// (`npm outdated` exits 1 whenever something is outdated)
    FindingsOnNonZero,
    /// Any non-zero exit is a failure
    Strict,
}

/// A package manager invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpmCommand {
    /// Arguments passed after the executable
    pub args: Vec<String>,
    /// Exit status interpretation
    pub policy: ExitPolicy,
}

impl NpmCommand {
    /// `outdated --json --long`
    pub fn outdated() -> Self {
        Self {
            args: vec!["outdated".into(), "--json".into(), "--long".into()],
            policy: ExitPolicy::FindingsOnNonZero,
        }
    }

    /// `uninstall <name> --force`
    pub fn uninstall(dependency: &OutdatedDependency) -> Self {
        Self {
            args: vec!["uninstall".into(), dependency.name.clone(), "--force".into()],
            policy: ExitPolicy::Strict,
        }
    }

    /// `install <name>@<latest> [--save|--save-dev] --force`
    pub fn install_latest(dependency: &OutdatedDependency) -> Self {
        Self::install(dependency, dependency.latest_spec())
    }

    /// Reinstalls the previously installed version, if one is known
    pub fn install_current(dependency: &OutdatedDependency) -> Option<Self> {
        dependency
            .current_spec()
            .map(|spec| Self::install(dependency, spec))
    }

    fn install(dependency: &OutdatedDependency, spec: String) -> Self {
        let mut args = vec!["install".to_string(), spec];
        if let Some(flag) = dependency.kind.save_flag() {
            args.push(flag.to_string());
        }
        args.push("--force".to_string());
        Self {
            args,
            policy: ExitPolicy::Strict,
        }
    }

    /// The npm subcommand (`outdated`, `install`, ...)
    pub fn subcommand(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or_default()
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code (None when terminated by a signal)
    pub code: Option<i32>,
    /// Whether the exit status was success
    pub success: bool,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}

impl CommandOutput {
    /// Create a successful output
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Create a failed output with the given exit code
    pub fn failure(code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            success: false,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }
}

/// Trait for running package manager commands
pub trait PackageManagerRunner {
    /// Executable name, used in messages
    fn program(&self) -> &str;

    /// Run the command to completion and capture its output
    ///
    /// Only a failure to start the process is an error here; exit status is
    /// interpreted by [`execute`].
    fn run(&self, command: &NpmCommand) -> Result<CommandOutput, CommandError>;
}

/// Default runner that executes real commands
#[derive(Debug, Clone)]
pub struct SystemPackageManager {
    program: String,
    working_dir: PathBuf,
}

impl SystemPackageManager {
    /// Create a runner for `program` executing in `working_dir`
    pub fn new(program: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            working_dir: working_dir.into(),
        }
    }
}

impl Default for SystemPackageManager {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM, ".")
    }
}

impl PackageManagerRunner for SystemPackageManager {
    fn program(&self) -> &str {
        &self.program
    }

    fn run(&self, command: &NpmCommand) -> Result<CommandOutput, CommandError> {
        tracing::debug!(
            program = %self.program,
            args = ?command.args,
            dir = %self.working_dir.display(),
            "running package manager"
        );

        let output = Command::new(&self.program)
            .args(&command.args)
            .current_dir(&self.working_dir)
            .output()
            .map_err(|e| CommandError::launch(label(self, command), e))?;

        let result = CommandOutput {
            code: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };
        tracing::debug!(
            code = ?result.code,
            stdout_len = result.stdout.len(),
            stderr_len = result.stderr.len(),
            "package manager finished"
        );
        Ok(result)
    }
}

/// Run a command and apply its exit policy
pub fn execute<R: PackageManagerRunner + ?Sized>(
    runner: &R,
    command: &NpmCommand,
) -> Result<CommandOutput, CommandError> {
    let output = runner.run(command)?;
    check_status(&label(runner, command), command.policy, output)
}

/// Decide whether a finished command counts as a failure
pub fn check_status(
    label: &str,
    policy: ExitPolicy,
    output: CommandOutput,
) -> Result<CommandOutput, CommandError> {
    if output.success {
        return Ok(output);
    }

    match policy {
        ExitPolicy::FindingsOnNonZero if !output.stdout.trim().is_empty() => {
            tracing::trace!(command = label, code = ?output.code, "non-zero exit carries data");
            Ok(output)
        }
        _ => Err(CommandError::failed(label, output.code, output.stderr)),
    }
}

fn label<R: PackageManagerRunner + ?Sized>(runner: &R, command: &NpmCommand) -> String {
    format!("{} {}", runner.program(), command.subcommand())
}
