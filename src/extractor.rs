use crate::errors::{AppError, AppResult};
use crate::models::ExtractSummary;
use crate::ui;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use zip::ZipArchive;

/// Extracts every entry of a zip archive into `destination`.
///
/// The archive's internal relative paths are recreated under `destination`,
/// which is created if absent and reused if present.
///
/// # Behavior
///
/// - **No early side effects**: the archive is opened and its central directory
///   read before anything is written, so a missing or malformed archive leaves
///   the filesystem untouched.
/// - **Overwrite**: each file is written next to its target and renamed over it
///   once complete, so extracting the same archive twice yields the same tree
///   without error and a damaged entry never replaces a good file.
/// - **Unsafe names**: entries whose names would escape `destination` (absolute
///   paths, `..` components) are skipped with a warning.
/// - **Progress tracking**: a progress bar ticks once per entry.
///
/// # Errors
///
/// Returns:
/// - `ArchiveNotFound` if `archive` does not exist
/// - `InvalidArchive` if it is not a readable zip file, or an entry cannot be decoded
/// - `IoError` if a directory or file cannot be written
///
/// # Example
///
/// ```no_run
/// use kaggle_fetch::extractor;
/// use std::path::Path;
///
/// # fn main() -> Result<(), kaggle_fetch::errors::AppError> {
/// let summary = extractor::extract_archive(
///     Path::new("venomous-non-venomous.zip"),
///     Path::new("dataset"),
/// )?;
/// println!("Extracted {} files", summary.files);
/// # Ok(())
/// # }
/// ```
pub fn extract_archive(archive: &Path, destination: &Path) -> AppResult<ExtractSummary> {
    let file = File::open(archive).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            AppError::ArchiveNotFound(archive.to_path_buf())
        } else {
            AppError::IoError(format!(
                "Failed to open archive {}: {}",
                archive.display(),
                e
            ))
        }
    })?;

    let mut zip = ZipArchive::new(file).map_err(|e| AppError::InvalidArchive {
        path: archive.to_path_buf(),
        reason: e.to_string(),
    })?;

    fs::create_dir_all(destination).map_err(|e| {
        AppError::IoError(format!(
            "Failed to create extraction directory {}: {}",
            destination.display(),
            e
        ))
    })?;

    info!(
        archive = %archive.display(),
        destination = %destination.display(),
        entries = zip.len(),
        "Starting extraction"
    );

    let pb = ui::create_extract_bar(archive, zip.len() as u64)?;
    let mut summary = ExtractSummary::default();

    for i in 0..zip.len() {
        let mut entry = zip.by_index(i).map_err(|e| AppError::InvalidArchive {
            path: archive.to_path_buf(),
            reason: format!("Failed to read entry {i}: {e}"),
        })?;
        pb.inc(1);

        let out_path = match entry.enclosed_name() {
            Some(path) => destination.join(path),
            None => {
                warn!(
                    entry = entry.name(),
                    "Skipping entry with a path outside the destination"
                );
                summary.skipped += 1;
                continue;
            }
        };

        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(|e| {
                AppError::IoError(format!(
                    "Failed to create directory {}: {}",
                    out_path.display(),
                    e
                ))
            })?;
            summary.directories += 1;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::IoError(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        pb.set_message(entry.name().to_string());
        let written = write_entry(&mut entry, &out_path).map_err(|e| match e {
            CopyError::Read(e) => AppError::InvalidArchive {
                path: archive.to_path_buf(),
                reason: format!("Failed to decode entry {}: {}", entry.name(), e),
            },
            CopyError::Write(e) => AppError::IoError(format!(
                "Failed to write {}: {}",
                out_path.display(),
                e
            )),
        })?;

        debug!(entry = entry.name(), bytes = written, "Extracted entry");
        summary.files += 1;
        summary.bytes += written;
    }

    pb.finish_with_message(format!("Extracted {} file(s)", summary.files));

    if summary.skipped > 0 {
        warn!(skipped = summary.skipped, "Some archive entries were skipped");
    }

    Ok(summary)
}

/// Where a copy from the archive into the destination failed.
enum CopyError {
    Read(io::Error),
    Write(io::Error),
}

/// Writes one entry to `out_path` through a `.part` sibling.
///
/// The target is only replaced after the entry has been read to the end, which
/// is also when the zip reader verifies the checksum. On failure the partial
/// file is removed.
fn write_entry<R: Read>(entry: &mut R, out_path: &Path) -> Result<u64, CopyError> {
    let part_path = part_path(out_path);
    let result = File::create(&part_path)
        .map_err(CopyError::Write)
        .and_then(|mut out_file| copy_entry(entry, &mut out_file))
        .and_then(|written| {
            fs::rename(&part_path, out_path)
                .map(|()| written)
                .map_err(CopyError::Write)
        });

    if result.is_err() {
        let _ = fs::remove_file(&part_path);
    }
    result
}

fn copy_entry<R: Read, W: Write>(reader: &mut R, writer: &mut W) -> Result<u64, CopyError> {
    let mut buf = [0u8; 64 * 1024];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => return Ok(total),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CopyError::Read(e)),
        };
        writer.write_all(&buf[..n]).map_err(CopyError::Write)?;
        total += n as u64;
    }
}

fn part_path(out_path: &Path) -> PathBuf {
    let mut name: OsString = out_path.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::FileOptions;
    use zip::{CompressionMethod, ZipWriter};

    fn write_zip(path: &Path, files: &[(&str, &str)]) {
        let mut zip = ZipWriter::new(File::create(path).unwrap());
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, content) in files {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn extracts_nested_entries() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("data.zip");
        write_zip(
            &archive,
            &[("readme.txt", "hello"), ("images/venomous/a.jpg", "jpeg")],
        );

        let destination = temp.path().join("dataset");
        let summary = extract_archive(&archive, &destination).unwrap();

        assert_eq!(summary.files, 2);
        assert_eq!(summary.bytes, 9);
        assert_eq!(
            fs::read_to_string(destination.join("images/venomous/a.jpg")).unwrap(),
            "jpeg"
        );
    }

    #[test]
    fn missing_archive_is_reported() {
        let temp = TempDir::new().unwrap();
        let destination = temp.path().join("dataset");

        let err = extract_archive(&temp.path().join("absent.zip"), &destination).unwrap_err();

        assert!(matches!(err, AppError::ArchiveNotFound(_)));
        assert!(!destination.exists());
    }

    #[test]
    fn non_zip_file_is_invalid_archive() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("data.zip");
        fs::write(&archive, "<html>401 Unauthorized</html>").unwrap();
        let destination = temp.path().join("dataset");

        let err = extract_archive(&archive, &destination).unwrap_err();

        assert!(matches!(err, AppError::InvalidArchive { .. }));
        assert!(!destination.exists());
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::InvalidData, "Invalid checksum"))
        }
    }

    #[test]
    fn read_failure_leaves_existing_file_untouched() {
        let temp = TempDir::new().unwrap();
        let out_path = temp.path().join("labels.csv");
        fs::write(&out_path, "good").unwrap();

        let result = write_entry(&mut FailingReader, &out_path);

        assert!(matches!(result, Err(CopyError::Read(_))));
        assert_eq!(fs::read_to_string(&out_path).unwrap(), "good");
        assert!(!part_path(&out_path).exists());
    }

    #[test]
    fn write_entry_replaces_existing_file() {
        let temp = TempDir::new().unwrap();
        let out_path = temp.path().join("labels.csv");
        fs::write(&out_path, "stale and longer").unwrap();

        let written = match write_entry(&mut "fresh".as_bytes(), &out_path) {
            Ok(written) => written,
            Err(_) => panic!("write_entry failed"),
        };

        assert_eq!(written, 5);
        assert_eq!(fs::read_to_string(&out_path).unwrap(), "fresh");
    }

    #[test]
    fn escaping_entries_are_skipped() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("data.zip");
        write_zip(&archive, &[("../outside.txt", "nope"), ("inside.txt", "ok")]);

        let destination = temp.path().join("dataset");
        let summary = extract_archive(&archive, &destination).unwrap();

        assert_eq!(summary.files, 1);
        assert_eq!(summary.skipped, 1);
        assert!(!temp.path().join("outside.txt").exists());
        assert!(destination.join("inside.txt").exists());
    }
}
