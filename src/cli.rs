use crate::config::{CredentialsConfig, ResolvedConfig};
use crate::credentials::resolve_credentials;
use crate::errors::{AppError, AppResult};
use crate::extractor::extract_archive;
use crate::fetcher::fetch_dataset;
use crate::models::{ExtractSummary, FetchOutcome};
use crate::utils::{format_elapsed, megabytes};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

// CLI metadata constants
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

/// Builds the command-line definition.
pub fn build_command() -> Command<'static> {
    Command::new("kaggle-fetch")
        .version(APP_VERSION)
        .author(APP_AUTHOR)
        .about(APP_ABOUT)
        .subcommand(
            Command::new("run")
                .about("Download a dataset and extract its archive")
                .after_help("Credentials are read by the download tool itself unless a credentials file is given.\nExample:\n  kaggle-fetch run -d mpwolke/venomous-non-venomous -o dataset")
                .arg(
                    Arg::new("dataset")
                        .short('d')
                        .long("dataset")
                        .help("Dataset reference (owner/dataset-name)")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Directory the archive is extracted into")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("program")
                        .short('p')
                        .long("program")
                        .help("Download tool executable")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("work_dir")
                        .short('w')
                        .long("work-dir")
                        .help("Working directory for the download tool")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("archive")
                        .short('a')
                        .long("archive")
                        .help("Archive file name, if the tool does not write <dataset-name>.zip")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("credentials_file")
                        .short('c')
                        .long("credentials-file")
                        .help("kaggle.json style file with username and key")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .help("Stop before extraction when the download tool fails")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("toml")
                .about("Run using a TOML configuration file")
                .arg(
                    Arg::new("config")
                        .help("Path to the TOML config file")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
}

/// Parses command-line arguments and runs the requested subcommand.
///
/// - `run`: defaults, overridden by flags
/// - `toml`: configuration loaded from a file
///
/// Without a subcommand the help text is printed.
pub fn cli() -> AppResult<()> {
    let cmd = build_command();
    let mut cmd_for_help = cmd.clone();
    let matches = cmd.get_matches();

    match matches.subcommand() {
        Some(("run", sub)) => {
            let config = config_from_matches(sub)?;
            run_workflow(&config)?;
        }
        Some(("toml", sub)) => {
            let config_path = sub
                .get_one::<PathBuf>("config")
                .ok_or_else(|| AppError::InvalidInput("Missing config path".into()))?;
            let config = ResolvedConfig::from_toml_file(config_path)?;
            run_workflow(&config)?;
        }
        _ => {
            cmd_for_help
                .print_help()
                .map_err(|e| AppError::IoError(format!("Failed to print help: {e}")))?;
        }
    }

    Ok(())
}

/// Applies `run` flags on top of the default configuration.
pub fn config_from_matches(sub: &ArgMatches) -> AppResult<ResolvedConfig> {
    let mut config = ResolvedConfig::default();

    if let Some(dataset) = sub.get_one::<String>("dataset") {
        config.dataset = dataset.clone();
    }
    if let Some(output) = sub.get_one::<PathBuf>("output") {
        config.destination = output.clone();
    }
    if let Some(program) = sub.get_one::<String>("program") {
        config.program = program.clone();
    }
    if let Some(work_dir) = sub.get_one::<PathBuf>("work_dir") {
        config.work_dir = work_dir.clone();
    }
    if let Some(archive) = sub.get_one::<PathBuf>("archive") {
        config.archive = Some(archive.clone());
    }
    if let Some(file) = sub.get_one::<PathBuf>("credentials_file") {
        config.credentials = Some(CredentialsConfig {
            file: Some(file.clone()),
            ..CredentialsConfig::default()
        });
    }
    if sub.get_one::<bool>("strict").copied().unwrap_or(false) {
        config.strict = true;
    }

    config.validate()?;
    Ok(config)
}

/// Runs credential resolution, download and extraction, in that order.
///
/// Outside strict mode a failed download only logs a warning and extraction is
/// attempted anyway; a missing archive then surfaces as `ArchiveNotFound`.
pub fn run_workflow(config: &ResolvedConfig) -> AppResult<ExtractSummary> {
    let started = Instant::now();
    let dataset = config.dataset_ref()?;
    let archive = config.archive_path()?;
    let destination = config.destination_path();

    let credentials = resolve_credentials(config.credentials.as_ref())?;

    let outcome = fetch_dataset(
        &config.program,
        &dataset,
        &config.work_dir,
        credentials.as_ref(),
    );
    check_outcome(&outcome, config.strict)?;

    let summary = extract_archive(&archive, &destination)?;

    info!(
        dataset = %dataset,
        fetch = %outcome,
        destination = %destination.display(),
        files = summary.files,
        directories = summary.directories,
        skipped = summary.skipped,
        size_mb = megabytes(summary.bytes),
        elapsed = %format_elapsed(started.elapsed()),
        "{}",
        completion_message(&outcome)
    );

    Ok(summary)
}

fn completion_message(outcome: &FetchOutcome) -> &'static str {
    if outcome.is_success() {
        "All operations completed successfully"
    } else {
        "Extraction completed after a failed download"
    }
}

fn check_outcome(outcome: &FetchOutcome, strict: bool) -> AppResult<()> {
    match outcome {
        FetchOutcome::Completed => Ok(()),
        _ if strict => Err(AppError::FetchFailed(format!("download tool {outcome}"))),
        _ => {
            warn!(outcome = %outcome, "Continuing to extraction despite download failure");
            Ok(())
        }
    }
}
