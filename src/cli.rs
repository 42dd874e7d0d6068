//! CLI argument parsing module for npm-updates

use crate::error::ConfigError;
use crate::package_manager::DEFAULT_PROGRAM;
use crate::snapshot::DEFAULT_SNAPSHOT_FILE;
use clap::Parser;
use std::path::PathBuf;

/// Check npm dependencies for updates and apply a selected subset
#[derive(Parser, Debug, Clone)]
#[command(
    name = "npm-updates",
    version,
    about = "Check npm dependencies for updates and apply a selected subset"
)]
pub struct CliArgs {
    /// Check for updates and save them to the snapshot file
    #[arg(long)]
    pub check: bool,

    /// Install updates (e.g. --update 1,2,3)
    #[arg(long, value_name = "IDS")]
    pub update: Option<String>,

    // Locations
    /// Snapshot file, relative to --dir unless absolute
    #[arg(long, value_name = "PATH", default_value = DEFAULT_SNAPSHOT_FILE)]
    pub snapshot: PathBuf,

    /// Package manager executable
    #[arg(long, value_name = "PROGRAM", default_value = DEFAULT_PROGRAM)]
    pub npm: String,

    /// Project directory (default: current directory)
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// The phase selected on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Scan and write the snapshot
    Check,
    /// Apply the given raw id list
    Update(String),
}

impl CliArgs {
    /// Resolve the requested phase; exactly one must be given
    ///
    /// An empty `--update` value counts as not given.
    pub fn mode(&self) -> Result<Mode, ConfigError> {
        let update = self.update.as_deref().filter(|ids| !ids.is_empty());
        match (self.check, update) {
            (true, None) => Ok(Mode::Check),
            (false, Some(ids)) => Ok(Mode::Update(ids.to_string())),
            (false, None) => Err(ConfigError::MissingMode),
            (true, Some(_)) => Err(ConfigError::ConflictingModes),
        }
    }

    /// Snapshot path resolved against the project directory
    pub fn snapshot_path(&self) -> PathBuf {
        if self.snapshot.is_absolute() {
            self.snapshot.clone()
        } else {
            self.dir.join(&self.snapshot)
        }
    }
}
