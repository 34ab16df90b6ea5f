//! kaggle-fetch library
//!
//! This crate provides the core functionality for the `kaggle-fetch` binary.
//! The crate root stays minimal; implementation and tests live in their modules.
//!
//! ## Overview
//!
//! Fetching a dataset is three steps run once each, in order:
//!
//! - [`credentials`] - Resolves the username and key and hands them to the download tool
//! - [`fetcher`] - Runs `kaggle datasets download -d <owner/slug>` and reports how it went
//! - [`extractor`] - Extracts the downloaded zip archive into the destination directory
//!
//! Supporting modules:
//!
//! - [`cli`] - Command-line interface and the workflow tying the steps together
//! - [`config`] - TOML-backed configuration with built-in defaults
//! - [`models`] - Dataset references, credentials and step outcomes
//! - [`errors`] - Error types used throughout the application
//!
//! ## Example Usage
//!
//! ```no_run
//! use kaggle_fetch::{cli, config::ResolvedConfig, errors::AppResult};
//!
//! # fn example() -> AppResult<()> {
//! let config = ResolvedConfig {
//!     dataset: "mpwolke/venomous-non-venomous".to_string(),
//!     ..ResolvedConfig::default()
//! };
//! let summary = cli::run_workflow(&config)?;
//! println!("{} files extracted", summary.files);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod errors;
pub mod extractor;
pub mod fetcher;
pub mod models;
pub mod ui;
pub mod utils;
