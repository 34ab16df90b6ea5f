use crate::constants::{ARCHIVE_EXTENSION, DATASET_REF_PATTERN};
use crate::errors::{AppError, AppResult};
use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Cached regex for dataset references of the form `owner/slug`.
static DATASET_REF_REGEX: OnceLock<Regex> = OnceLock::new();

/// Identifier of a remote dataset, as accepted by `kaggle datasets download -d`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetRef {
    owner: String,
    slug: String,
}

impl DatasetRef {
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Returns the file name the download tool writes for this dataset.
    ///
    /// The tool names the archive after the slug and drops it into its
    /// working directory, e.g. `mpwolke/venomous-non-venomous` produces
    /// `venomous-non-venomous.zip`.
    pub fn archive_name(&self) -> String {
        format!("{}.{ARCHIVE_EXTENSION}", self.slug)
    }
}

impl FromStr for DatasetRef {
    type Err = AppError;

    fn from_str(value: &str) -> AppResult<Self> {
        let regex = DATASET_REF_REGEX.get_or_init(|| {
            Regex::new(DATASET_REF_PATTERN).expect("DATASET_REF_PATTERN is a valid regex pattern")
        });

        let trimmed = value.trim();
        let captures = regex.captures(trimmed).ok_or_else(|| {
            AppError::InvalidInput(format!(
                "Dataset reference '{trimmed}' must have the form owner/dataset-name"
            ))
        })?;

        if [&captures[1], &captures[2]]
            .iter()
            .any(|part| part.chars().all(|c| c == '.'))
        {
            return Err(AppError::InvalidInput(format!(
                "Dataset reference '{trimmed}' contains a relative path segment"
            )));
        }

        Ok(Self {
            owner: captures[1].to_string(),
            slug: captures[2].to_string(),
        })
    }
}

impl fmt::Display for DatasetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.slug)
    }
}

/// Username and API key handed to the download tool.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("key", &"<redacted>")
            .finish()
    }
}

/// What happened when the download tool was run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The tool exited with status 0.
    Completed,
    /// The tool ran but exited non-zero; `code` is `None` when it was killed by a signal.
    Failed { code: Option<i32> },
    /// The tool could not be started at all.
    NotLaunched { reason: String },
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for FetchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Failed { code: Some(code) } => write!(f, "exited with status {code}"),
            Self::Failed { code: None } => write!(f, "terminated by signal"),
            Self::NotLaunched { reason } => write!(f, "could not be started: {reason}"),
        }
    }
}

/// Counts of what an extraction wrote to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    pub files: usize,
    pub directories: usize,
    /// Entries whose names would land outside the destination.
    pub skipped: usize,
    pub bytes: u64,
}
