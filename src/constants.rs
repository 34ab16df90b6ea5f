// Download tool
pub const DEFAULT_PROGRAM: &str = "kaggle";
pub const FETCH_SUBCOMMAND: &[&str] = &["datasets", "download"];
pub const DATASET_FLAG: &str = "-d";

// Credential environment variables read by the download tool
pub const USERNAME_ENV: &str = "KAGGLE_USERNAME";
pub const KEY_ENV: &str = "KAGGLE_KEY";

// Defaults
pub const DEFAULT_DATASET: &str = "mpwolke/venomous-non-venomous";
pub const DEFAULT_DESTINATION: &str = "dataset";
pub const DEFAULT_WORK_DIR: &str = ".";
pub const ARCHIVE_EXTENSION: &str = "zip";

// Patterns
pub const DATASET_REF_PATTERN: &str = r"^([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)$";

// Logging
pub const DEFAULT_LOG_FILTER: &str = "info";
