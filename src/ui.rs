use crate::errors::{AppError, AppResult};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

const EXTRACT_TEMPLATE: &str =
    "{prefix:.bold} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} entries {wide_msg}";

/// Progress bar for extracting `entries` entries out of `archive`.
///
/// The prefix shows the archive file name; callers set the message to the
/// entry currently being written.
pub fn create_extract_bar(archive: &Path, entries: u64) -> AppResult<ProgressBar> {
    let style = ProgressStyle::default_bar()
        .template(EXTRACT_TEMPLATE)
        .map_err(|e| AppError::IoError(format!("Invalid progress bar template: {e}")))?
        .progress_chars("=> ");

    let label = archive
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| archive.display().to_string());

    let pb = ProgressBar::new(entries).with_style(style);
    pb.set_prefix(label);
    Ok(pb)
}

#[cfg(test)]
mod tests {
    use super::create_extract_bar;
    use std::path::Path;

    #[test]
    fn extract_bar_is_labelled_with_archive_name() {
        let pb = create_extract_bar(Path::new("/tmp/work/venomous-non-venomous.zip"), 7).unwrap();
        assert_eq!(pb.length(), Some(7));
        assert_eq!(pb.prefix(), "venomous-non-venomous.zip");
        pb.finish_and_clear();
    }
}
