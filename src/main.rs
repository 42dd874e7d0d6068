//! npm-updates - check npm dependencies for updates and apply a selected subset

use clap::Parser;
use npm_updates::cli::{CliArgs, Mode};
use npm_updates::error::AppError;
use npm_updates::logging;
use npm_updates::orchestrator::Orchestrator;
use npm_updates::output::OutputConfig;
use npm_updates::package_manager::SystemPackageManager;
use npm_updates::snapshot::SnapshotStore;
use std::io::{self, Write};
use std::process::ExitCode;

/// Exit code for usage errors and updates that skipped unknown ids
const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    if let Err(e) = logging::init(args.verbose) {
        eprintln!("WARNING: {}", e);
    }

    // Run the main logic and handle errors
    match run(args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let mode = match args.mode() {
        Ok(mode) => mode,
        Err(e) => {
            println!("WARNING: {}", e);
            return Ok(ExitCode::from(EXIT_USAGE));
        }
    };

    if args.verbose {
        eprintln!("npm-updates v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Project: {}", args.dir.display());
        eprintln!("Snapshot: {}", args.snapshot_path().display());
    }

    let runner = SystemPackageManager::new(args.npm.clone(), args.dir.clone());
    let store = SnapshotStore::new(args.snapshot_path());
    let config = OutputConfig::from_cli(args.json, args.verbose, args.quiet, args.no_color);
    let orchestrator = Orchestrator::new(&runner, store, config);

    let mut stdout = io::stdout().lock();
    let exit_code = match mode {
        Mode::Check => {
            orchestrator.check(&mut stdout)?;
            ExitCode::SUCCESS
        }
        Mode::Update(ids) => {
            let report = orchestrator.update(&ids, &mut stdout)?;
            if report.has_unknown_ids() {
                ExitCode::from(EXIT_USAGE)
            } else {
                ExitCode::SUCCESS
            }
        }
    };
    stdout.flush()?;

    Ok(exit_code)
}

/// Print a prefixed diagnostic, echoing the package manager's stderr if any
fn report_error(error: &anyhow::Error) {
    eprintln!("ERROR: {}", error);
    if let Some(diagnostic) = error
        .downcast_ref::<AppError>()
        .and_then(AppError::diagnostic)
    {
        eprintln!("ERROR: command output: {}", diagnostic.trim_end());
    }
}
