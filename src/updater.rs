//! Update applier
//!
//! Resolves the selected ids against the stored snapshot and replaces each
//! dependency with an uninstall followed by an install pinned to its latest
//! version. Dependencies are processed strictly one after another.

use crate::domain::{IdentifiedDependency, Selection};
use crate::error::{AppError, CommandError};
use crate::output::OutputFormatter;
use crate::package_manager::{execute, NpmCommand, PackageManagerRunner};
use crate::progress::Progress;
use crate::snapshot::SnapshotStore;
use std::io::Write;

/// Result of processing one requested id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The dependency was reinstalled at its latest version
    Updated(IdentifiedDependency),
    /// The id is not present in the snapshot
    UnknownId(usize),
}

/// Outcomes of an update run, in the order the ids were given
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    outcomes: Vec<UpdateOutcome>,
}

impl UpdateReport {
    /// Build a report from outcomes already in request order
    pub fn from_outcomes(outcomes: Vec<UpdateOutcome>) -> Self {
        Self { outcomes }
    }

    /// Dependencies that were replaced
    pub fn updated(&self) -> impl Iterator<Item = &IdentifiedDependency> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            UpdateOutcome::Updated(dependency) => Some(dependency),
            UpdateOutcome::UnknownId(_) => None,
        })
    }

    /// Requested ids that were not in the snapshot
    pub fn unknown_ids(&self) -> Vec<usize> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                UpdateOutcome::UnknownId(id) => Some(*id),
                UpdateOutcome::Updated(_) => None,
            })
            .collect()
    }

    /// Whether any requested id was skipped
    pub fn has_unknown_ids(&self) -> bool {
        self.outcomes
            .iter()
            .any(|outcome| matches!(outcome, UpdateOutcome::UnknownId(_)))
    }

    fn push(&mut self, outcome: UpdateOutcome) {
        self.outcomes.push(outcome);
    }
}

/// Applies a selection of updates from the snapshot
pub struct Updater<'a, R: PackageManagerRunner + ?Sized> {
    runner: &'a R,
    store: &'a SnapshotStore,
    formatter: &'a dyn OutputFormatter,
    progress: Progress,
}

impl<'a, R: PackageManagerRunner + ?Sized> Updater<'a, R> {
    pub fn new(
        runner: &'a R,
        store: &'a SnapshotStore,
        formatter: &'a dyn OutputFormatter,
    ) -> Self {
        Self {
            runner,
            store,
            formatter,
            progress: Progress::disabled(),
        }
    }

    /// Show a spinner while each command runs
    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.progress = Progress::new(enabled);
        self
    }

    /// Replace every selected dependency, then remove the snapshot
    ///
    /// Ids outside the snapshot are reported and skipped. Any command failure
    /// stops the run immediately and leaves the snapshot in place.
    pub fn apply(
        &mut self,
        selection: &Selection,
        writer: &mut dyn Write,
    ) -> Result<UpdateReport, AppError> {
        let snapshot = self.store.load()?;
        let mut report = UpdateReport::default();

        for &id in selection.ids() {
            let Some(dependency) = snapshot.get(id) else {
                tracing::debug!(id, len = snapshot.len(), "id not in snapshot");
                self.formatter.format_unknown_id(id, snapshot.len(), writer)?;
                report.push(UpdateOutcome::UnknownId(id));
                continue;
            };

            self.formatter.format_update_started(dependency, writer)?;
            self.replace(dependency, writer)?;
            self.formatter.format_update_finished(dependency, writer)?;
            report.push(UpdateOutcome::Updated(dependency.clone()));
        }

        self.store.clear()?;
        self.formatter.format_update_report(&report, writer)?;
        Ok(report)
    }

    /// Uninstall then install at the latest version
    fn replace(
        &mut self,
        dependency: &IdentifiedDependency,
        writer: &mut dyn Write,
    ) -> Result<(), AppError> {
        self.run(&NpmCommand::uninstall(dependency))?;

        if let Err(err) = self.run(&NpmCommand::install_latest(dependency)) {
            if let Err(report_err) = self.rollback(dependency, writer) {
                tracing::debug!(
                    name = %dependency.name,
                    error = %report_err,
                    "failed to report rollback"
                );
            }
            return Err(err.into());
        }
        Ok(())
    }

    /// Try to put the previously installed version back
    fn rollback(
        &mut self,
        dependency: &IdentifiedDependency,
        writer: &mut dyn Write,
    ) -> Result<(), AppError> {
        let restored = match NpmCommand::install_current(dependency) {
            Some(command) => match self.run(&command) {
                Ok(()) => true,
                Err(err) => {
                    tracing::debug!(name = %dependency.name, error = %err, "rollback failed");
                    false
                }
            },
            None => false,
        };
        self.formatter.format_rollback(dependency, restored, writer)?;
        Ok(())
    }

    fn run(&mut self, command: &NpmCommand) -> Result<(), CommandError> {
        let runner = self.runner;
        let message = format!("{} {}", runner.program(), command.args.join(" "));
        self.progress
            .with_spinner(&message, || execute(runner, command))
            .map(|_| ())
    }
}
