use crate::constants::{DATASET_FLAG, FETCH_SUBCOMMAND};
use crate::credentials::apply_credentials;
use crate::models::{Credentials, DatasetRef, FetchOutcome};
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};

/// Returns the argument sequence passed to the download tool.
///
/// Exactly `datasets download -d <owner/slug>`; no output, quiet or format flags.
pub fn fetch_args(dataset: &DatasetRef) -> Vec<String> {
    FETCH_SUBCOMMAND
        .iter()
        .map(|s| s.to_string())
        .chain([DATASET_FLAG.to_string(), dataset.to_string()])
        .collect()
}

/// Anchors a relative program path like `./kaggle` at the current directory.
///
/// The command runs inside `work_dir`, which would otherwise change what a
/// relative path points at. Bare names are left for the `PATH` lookup.
pub fn resolve_program(program: &str) -> PathBuf {
    let path = Path::new(program);
    if path.is_relative() && path.components().count() > 1 {
        if let Ok(cwd) = env::current_dir() {
            return cwd.join(path);
        }
    }
    path.to_path_buf()
}

/// Builds the download command without running it.
///
/// Credentials, when given, are set on the command's environment so the tool
/// sees them from its first instruction.
pub fn build_fetch_command(
    program: &str,
    dataset: &DatasetRef,
    work_dir: &Path,
    credentials: Option<&Credentials>,
) -> Command {
    let mut command = Command::new(resolve_program(program));
    command.args(fetch_args(dataset)).current_dir(work_dir);
    if let Some(credentials) = credentials {
        apply_credentials(&mut command, credentials);
    }
    command
}

/// Runs the download tool and waits for it to exit.
///
/// The tool's output streams are inherited. A tool that cannot be started or
/// exits non-zero is reported through the returned [`FetchOutcome`], never as an
/// error; whether that stops the workflow is the caller's decision.
pub fn fetch_dataset(
    program: &str,
    dataset: &DatasetRef,
    work_dir: &Path,
    credentials: Option<&Credentials>,
) -> FetchOutcome {
    let mut command = build_fetch_command(program, dataset, work_dir, credentials);

    info!(
        program = program,
        dataset = %dataset,
        work_dir = %work_dir.display(),
        "Fetching dataset"
    );
    debug!(args = ?fetch_args(dataset), "Download command arguments");

    let outcome = match command.status() {
        Ok(status) if status.success() => FetchOutcome::Completed,
        Ok(status) => FetchOutcome::Failed {
            code: status.code(),
        },
        Err(e) => FetchOutcome::NotLaunched {
            reason: e.to_string(),
        },
    };

    if outcome.is_success() {
        info!(dataset = %dataset, "Download tool finished");
    } else {
        warn!(
            program = program,
            dataset = %dataset,
            outcome = %outcome,
            "Download tool did not complete"
        );
    }

    outcome
}
