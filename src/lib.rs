//! npm-updates - check npm dependencies for updates and apply a selected subset
//!
//! The work happens in two separate invocations:
//! - `--check` runs `npm outdated`, numbers the results and saves them to a
//!   snapshot file
//! - `--update <ids>` reads the snapshot and reinstalls the chosen
//!   dependencies at their latest versions

pub mod cli;
pub mod domain;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod output;
pub mod package_manager;
pub mod progress;
pub mod scanner;
pub mod snapshot;
pub mod updater;
