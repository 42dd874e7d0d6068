//! Text output formatter for human-readable display
//!
//! This module provides:
//! - The numbered list of outdated dependencies printed by a check
//! - Semantic version change type indication (major/minor/patch)
//! - Per-dependency progress lines during an update

use crate::domain::IdentifiedDependency;
use crate::output::{OutputFormatter, Verbosity};
use crate::updater::UpdateReport;
use colored::Colorize;
use semver::Version;
use std::io::Write;

/// Semantic version change type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionChangeType {
    /// Major version change (breaking)
    Major,
    /// Minor version change (features)
    Minor,
    /// Patch version change (fixes)
    Patch,
    /// Unknown or unparseable
    Unknown,
}

impl VersionChangeType {
    /// Determine the change type between two versions
    pub fn from_versions(old: &str, new: &str) -> Self {
        let parse = |v: &str| Version::parse(v.trim().trim_start_matches('v')).ok();

        match (parse(old), parse(new)) {
            (Some(old), Some(new)) => {
                if new.major != old.major {
                    VersionChangeType::Major
                } else if new.minor != old.minor {
                    VersionChangeType::Minor
                } else {
                    VersionChangeType::Patch
                }
            }
            _ => VersionChangeType::Unknown,
        }
    }

    /// Get the display label with color
    pub fn colored_label(&self) -> String {
        match self {
            VersionChangeType::Major => "major".red().bold().to_string(),
            VersionChangeType::Minor => "minor".yellow().to_string(),
            VersionChangeType::Patch => "patch".green().to_string(),
            VersionChangeType::Unknown => "?".dimmed().to_string(),
        }
    }

    /// Get the plain label
    pub fn label(&self) -> &'static str {
        match self {
            VersionChangeType::Major => "major",
            VersionChangeType::Minor => "minor",
            VersionChangeType::Patch => "patch",
            VersionChangeType::Unknown => "?",
        }
    }
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }

    fn warning(&self, message: &str, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.color {
            writeln!(writer, "{} {}", "WARNING:".yellow().bold(), message)
        } else {
            writeln!(writer, "WARNING: {}", message)
        }
    }

    /// Format one `[id] name (current => latest)` line
    fn format_dependency_line(
        &self,
        dependency: &IdentifiedDependency,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let change_type = VersionChangeType::from_versions(&dependency.current, &dependency.latest);

        if self.color {
            let dev_display = if dependency.kind.is_dev() {
                " (dev)".dimmed().to_string()
            } else {
                String::new()
            };
            write!(
                writer,
                "{} {} ({} => {}) {}{}",
                dependency.label().cyan(),
                dependency.name.bold(),
                dependency.current.dimmed(),
                dependency.latest.bright_white().bold(),
                change_type.colored_label(),
                dev_display
            )?;
        } else {
            let dev_marker = if dependency.kind.is_dev() { " (dev)" } else { "" };
            write!(
                writer,
                "{} {} {}{}",
                dependency.label(),
                dependency.dependency,
                change_type.label(),
                dev_marker
            )?;
        }

        if self.verbosity == Verbosity::Verbose {
            let details = format!("wanted {}, {}", dependency.wanted, dependency.location);
            if self.color {
                write!(writer, "  {}", details.dimmed())?;
            } else {
                write!(writer, "  {}", details)?;
            }
        }

        writeln!(writer)
    }
}

impl OutputFormatter for TextFormatter {
    fn format_check(
        &self,
        dependencies: &[IdentifiedDependency],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if dependencies.is_empty() {
            return writeln!(writer, "No outdated dependencies found");
        }

        if !self.quiet() {
            let count = dependencies.len();
            let noun = if count == 1 {
                "dependency"
            } else {
                "dependencies"
            };
            let hint = "npm-updates --update <ids>";
            if self.color {
                writeln!(writer, "{} {} to update found", count.to_string().green(), noun)?;
                writeln!(writer, "To update, run: {}", hint.bold())?;
            } else {
                writeln!(writer, "{} {} to update found", count, noun)?;
                writeln!(writer, "To update, run: {}", hint)?;
            }
            writeln!(writer)?;
        }

        for dependency in dependencies {
            self.format_dependency_line(dependency, writer)?;
        }

        if !self.quiet() {
            writeln!(writer)?;
        }
        Ok(())
    }

    fn format_update_started(
        &self,
        dependency: &IdentifiedDependency,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if self.quiet() {
            return Ok(());
        }
        if self.color {
            writeln!(
                writer,
                "Updating '{}' from {} to {}",
                dependency.name.bold(),
                dependency.current.dimmed(),
                dependency.latest.bright_white().bold()
            )
        } else {
            writeln!(
                writer,
                "Updating '{}' from {} to {}",
                dependency.name, dependency.current, dependency.latest
            )
        }
    }

    fn format_update_finished(
        &self,
        dependency: &IdentifiedDependency,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if self.quiet() {
            return Ok(());
        }
        if self.color {
            writeln!(
                writer,
                "Dependency '{}' updated {}",
                dependency.name.bold(),
                "successfully".green()
            )?;
        } else {
            writeln!(writer, "Dependency '{}' updated successfully", dependency.name)?;
        }
        writeln!(writer)
    }

    fn format_unknown_id(
        &self,
        id: usize,
        snapshot_len: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let entries = if snapshot_len == 1 { "entry" } else { "entries" };
        self.warning(
            &format!(
                "unknown id {} (snapshot has {} {})",
                id, snapshot_len, entries
            ),
            writer,
        )
    }

    fn format_rollback(
        &self,
        dependency: &IdentifiedDependency,
        restored: bool,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if restored {
            writeln!(
                writer,
                "Reinstalled '{}' {} after the failed install",
                dependency.name, dependency.current
            )
        } else {
            self.warning(
                &format!(
                    "'{}' was uninstalled and could not be reinstalled",
                    dependency.name
                ),
                writer,
            )
        }
    }

    fn format_update_report(
        &self,
        report: &UpdateReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let unknown = report.unknown_ids();
        if !unknown.is_empty() {
            let list = unknown
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            self.warning(&format!("skipped unknown ids: {}", list), writer)?;
        }

        if self.verbosity == Verbosity::Verbose {
            writeln!(writer, "{} updated", report.updated().count())?;
        }

        if self.color {
            writeln!(writer, "{}", "Done!".green().bold())
        } else {
            writeln!(writer, "Done!")
        }
    }
}
