use crate::constants::{DEFAULT_DATASET, DEFAULT_DESTINATION, DEFAULT_PROGRAM, DEFAULT_WORK_DIR};
use crate::errors::{AppError, AppResult};
use crate::models::DatasetRef;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolved configuration with every value filled in.
///
/// Deserialized from TOML by [`ResolvedConfig::from_toml_file`]; keys that are
/// absent from the file fall back to [`Default`]. Relative `archive` and
/// `destination` paths are interpreted against `work_dir`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolvedConfig {
    /// Dataset reference in `owner/slug` form
    pub dataset: String,
    /// Directory the archive is extracted into
    pub destination: PathBuf,
    /// Download tool executable (looked up on `PATH` when not a path)
    pub program: String,
    /// Working directory for the download tool; the archive lands here
    pub work_dir: PathBuf,
    /// Archive file name override. Defaults to `<slug>.zip`.
    pub archive: Option<PathBuf>,
    /// Abort before extraction when the download tool does not succeed
    pub strict: bool,
    /// Credentials handed to the download tool
    pub credentials: Option<CredentialsConfig>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            dataset: DEFAULT_DATASET.to_string(),
            destination: PathBuf::from(DEFAULT_DESTINATION),
            program: DEFAULT_PROGRAM.to_string(),
            work_dir: PathBuf::from(DEFAULT_WORK_DIR),
            archive: None,
            strict: false,
            credentials: None,
        }
    }
}

/// `[credentials]` table.
///
/// Either both `username` and `key` are given inline, or `file` points at a
/// `kaggle.json` style document. With neither, the tool falls back to its own lookup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CredentialsConfig {
    pub username: Option<String>,
    pub key: Option<String>,
    pub file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the TOML is malformed, unknown keys are present,
    /// or the loaded values fail [`ResolvedConfig::validate`].
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            AppError::IoError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config: ResolvedConfig = toml::from_str(&contents)
            .map_err(|e| AppError::InvalidInput(format!("Failed to parse config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Checks the values that cannot be expressed in the type alone.
    pub fn validate(&self) -> AppResult<()> {
        self.dataset_ref()?;

        if self.program.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Download program must not be empty".into(),
            ));
        }
        if self.destination.as_os_str().is_empty() {
            return Err(AppError::InvalidInput(
                "Destination directory must not be empty".into(),
            ));
        }
        if matches!(&self.archive, Some(archive) if archive.as_os_str().is_empty()) {
            return Err(AppError::InvalidInput(
                "Archive name must not be empty".into(),
            ));
        }

        Ok(())
    }

    pub fn dataset_ref(&self) -> AppResult<DatasetRef> {
        self.dataset.parse()
    }

    /// Location of the archive the download tool is expected to write.
    pub fn archive_path(&self) -> AppResult<PathBuf> {
        let name = match &self.archive {
            Some(archive) => archive.clone(),
            None => PathBuf::from(self.dataset_ref()?.archive_name()),
        };
        Ok(self.work_dir.join(name))
    }

    pub fn destination_path(&self) -> PathBuf {
        self.work_dir.join(&self.destination)
    }
}
