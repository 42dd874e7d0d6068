//! Output formatting for both phases
//!
//! This module provides:
//! - Text output for human-readable display
//! - JSON output for machine processing

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::{TextFormatter, VersionChangeType};

use crate::domain::IdentifiedDependency;
use crate::updater::UpdateReport;
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for machine processing
    Json,
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Minimal output
    Quiet,
    /// Normal output
    #[default]
    Normal,
    /// Detailed output with additional information
    Verbose,
}

/// Configuration for output formatting
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Output format (text, json)
    pub format: OutputFormat,
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Whether to use colors
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            verbosity: Verbosity::default(),
            color: true,
        }
    }
}

impl OutputConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(json: bool, verbose: bool, quiet: bool, no_color: bool) -> Self {
        let format = if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        let verbosity = if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };

        Self {
            format,
            verbosity,
            color: !no_color,
        }
    }

    /// Whether spinners should be drawn
    pub fn show_progress(&self) -> bool {
        self.format == OutputFormat::Text && self.verbosity != Verbosity::Quiet
    }
}

/// Trait for output formatters
///
/// The update phase reports each step as it happens, so the per-dependency
/// methods are called while package manager commands are still running.
pub trait OutputFormatter {
    /// Write the result of a check
    fn format_check(
        &self,
        dependencies: &[IdentifiedDependency],
        writer: &mut dyn Write,
    ) -> std::io::Result<()>;

    /// A dependency is about to be replaced
    fn format_update_started(
        &self,
        dependency: &IdentifiedDependency,
        writer: &mut dyn Write,
    ) -> std::io::Result<()>;

    /// A dependency was replaced
    fn format_update_finished(
        &self,
        dependency: &IdentifiedDependency,
        writer: &mut dyn Write,
    ) -> std::io::Result<()>;

    /// A requested id is not in the snapshot
    fn format_unknown_id(
        &self,
        id: usize,
        snapshot_len: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()>;

    /// The previous version was reinstalled after a failed install
    fn format_rollback(
        &self,
        dependency: &IdentifiedDependency,
        restored: bool,
        writer: &mut dyn Write,
    ) -> std::io::Result<()>;

    /// Write the final update summary
    fn format_update_report(
        &self,
        report: &UpdateReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()>;
}

/// Create a formatter based on configuration
pub fn create_formatter(config: &OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Text => Box::new(TextFormatter::with_color(config.verbosity, config.color)),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
    }
}
