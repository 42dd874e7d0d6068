//! Coordinates the two phases
//!
//! - check: scan → write snapshot → print listing
//! - update: validate ids → load snapshot → replace each → remove snapshot

use crate::domain::{IdentifiedDependency, Selection};
use crate::error::AppError;
use crate::output::{create_formatter, OutputConfig, OutputFormat, OutputFormatter, Verbosity};
use crate::package_manager::PackageManagerRunner;
use crate::progress::Progress;
use crate::scanner;
use crate::snapshot::SnapshotStore;
use crate::updater::{UpdateReport, Updater};
use std::io::Write;

/// Runs a phase against a package manager and a snapshot store
pub struct Orchestrator<'a, R: PackageManagerRunner + ?Sized> {
    runner: &'a R,
    store: SnapshotStore,
    config: OutputConfig,
    formatter: Box<dyn OutputFormatter>,
}

impl<'a, R: PackageManagerRunner + ?Sized> Orchestrator<'a, R> {
    pub fn new(runner: &'a R, store: SnapshotStore, config: OutputConfig) -> Self {
        let formatter = create_formatter(&config);
        Self {
            runner,
            store,
            config,
            formatter,
        }
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    fn announce(&self, message: &str, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.config.format == OutputFormat::Text && self.config.verbosity != Verbosity::Quiet {
            writeln!(writer, "{}", message)?;
            writeln!(writer)?;
        }
        Ok(())
    }

    /// Scan for outdated dependencies and persist them
    ///
    /// When nothing is outdated no snapshot is written and a stale one is
    /// removed, so a later update cannot act on old ids.
    pub fn check(&self, writer: &mut dyn Write) -> Result<Vec<IdentifiedDependency>, AppError> {
        self.announce("Checking for updates...", writer)?;

        let mut progress = Progress::new(self.config.show_progress());
        let runner = self.runner;
        let dependencies = progress.with_spinner("Running npm outdated...", || {
            scanner::scan(runner)
        })?;

        if dependencies.is_empty() {
            if self.store.clear_if_exists()? {
                tracing::debug!(path = %self.store.path().display(), "removed stale snapshot");
            }
        } else {
            self.store.save(&dependencies)?;
        }

        self.formatter.format_check(&dependencies, writer)?;
        Ok(dependencies)
    }

    /// Apply the updates named by a raw `--update` value
    ///
    /// The id list is validated before anything else happens.
    pub fn update(&self, raw_ids: &str, writer: &mut dyn Write) -> Result<UpdateReport, AppError> {
        let selection = Selection::parse(raw_ids)?;
        tracing::debug!(ids = ?selection.ids(), "parsed selection");

        self.announce("Updating...", writer)?;

        Updater::new(self.runner, &self.store, self.formatter.as_ref())
            .with_progress(self.config.show_progress())
            .apply(&selection, writer)
    }
}
