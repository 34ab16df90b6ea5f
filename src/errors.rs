use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input format
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// IO operation failed
    #[error("IO error: {0}")]
    IoError(String),
    /// The archive expected after the fetch step is not on disk
    #[error("Archive not found: {}", .0.display())]
    ArchiveNotFound(PathBuf),
    /// The archive exists but cannot be read as a zip file
    #[error("Invalid archive {}: {reason}", path.display())]
    InvalidArchive { path: PathBuf, reason: String },
    /// The download tool did not complete (strict mode only)
    #[error("Fetch failed: {0}")]
    FetchFailed(String),
    /// Credentials could not be resolved
    #[error("Credentials error: {0}")]
    CredentialsError(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

// Custom type alias for Results in this application
pub type AppResult<T> = Result<T, AppError>;
