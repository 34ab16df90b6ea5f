//! Credential resolution and injection for the download tool.
//!
//! Credentials never live in source. They come from the `[credentials]` table
//! of the configuration, either inline or through a `kaggle.json` file, and are
//! handed to the download tool through its environment.

use crate::config::CredentialsConfig;
use crate::constants::{KEY_ENV, USERNAME_ENV};
use crate::errors::{AppError, AppResult};
use crate::models::Credentials;
use std::fs;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

/// Resolves the credentials to inject, if any.
///
/// Inline `username`/`key` win over `file`. Returns `Ok(None)` when the table is
/// absent or empty, in which case the download tool performs its own lookup.
///
/// # Errors
///
/// Returns `InvalidInput` when only one of `username`/`key` is set, and
/// `CredentialsError` when the credentials file cannot be read or parsed.
pub fn resolve_credentials(config: Option<&CredentialsConfig>) -> AppResult<Option<Credentials>> {
    let Some(config) = config else {
        info!("No credentials configured, deferring to the download tool's own lookup");
        return Ok(None);
    };

    match (&config.username, &config.key) {
        (Some(username), Some(key)) => {
            debug!(username = %username, "Using inline credentials");
            return Ok(Some(Credentials {
                username: username.clone(),
                key: key.clone(),
            }));
        }
        (Some(_), None) | (None, Some(_)) => {
            return Err(AppError::InvalidInput(
                "Credentials need both username and key".into(),
            ));
        }
        (None, None) => {}
    }

    match &config.file {
        Some(path) => load_credentials_file(path).map(Some),
        None => {
            info!("No credentials configured, deferring to the download tool's own lookup");
            Ok(None)
        }
    }
}

/// Reads a `kaggle.json` style document: `{"username": "...", "key": "..."}`.
pub fn load_credentials_file(path: &Path) -> AppResult<Credentials> {
    let contents = fs::read_to_string(path).map_err(|e| {
        AppError::CredentialsError(format!(
            "Failed to read credentials file {}: {}",
            path.display(),
            e
        ))
    })?;

    let credentials: Credentials = serde_json::from_str(&contents).map_err(|e| {
        AppError::CredentialsError(format!(
            "Failed to parse credentials file {}: {}",
            path.display(),
            e
        ))
    })?;

    debug!(
        username = %credentials.username,
        file = %path.display(),
        "Loaded credentials file"
    );
    Ok(credentials)
}

/// Sets the credential variables on the environment the command will be spawned with.
///
/// Only the child process sees the values; the parent's environment is left untouched.
pub fn apply_credentials(command: &mut Command, credentials: &Credentials) {
    command
        .env(USERNAME_ENV, &credentials.username)
        .env(KEY_ENV, &credentials.key);
}
