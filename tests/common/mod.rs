//! Common test utilities for integration tests

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use walkdir::WalkDir;

/// Helper function to create a test ZIP file with specified files
#[allow(dead_code)]
pub fn create_test_zip(
    zip_path: &Path,
    files: &[(&str, &str)],
) -> Result<(), Box<dyn std::error::Error>> {
    use zip::write::FileOptions;
    use zip::ZipWriter;

    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(zip::CompressionMethod::Stored);

    for (name, content) in files {
        if name.ends_with('/') {
            zip.add_directory(*name, options)?;
        } else {
            zip.start_file(*name, options)?;
            zip.write_all(content.as_bytes())?;
        }
    }

    zip.finish()?;
    Ok(())
}

/// Reads every regular file under `root` into a map keyed by `/`-separated relative path
#[allow(dead_code)]
pub fn read_tree(root: &Path) -> BTreeMap<String, String> {
    WalkDir::new(root)
        .into_iter()
        .map(|entry| entry.unwrap())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let relative = entry
                .path()
                .strip_prefix(root)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            let content = fs::read_to_string(entry.path()).unwrap();
            (relative, content)
        })
        .collect()
}

/// Writes a stand-in for the download tool.
///
/// The script records its arguments to `<record_dir>/args.txt` and the
/// credential variables to `<record_dir>/env.txt`, copies `fixture` (when given)
/// into its working directory as `archive_name`, then exits with `exit_code`.
#[cfg(unix)]
#[allow(dead_code)]
pub fn write_fake_tool(
    script_path: &Path,
    record_dir: &Path,
    fixture: Option<(&Path, &str)>,
    exit_code: i32,
) {
    use std::os::unix::fs::PermissionsExt;

    let copy_line = match fixture {
        Some((zip, archive_name)) => format!("cp '{}' './{}'\n", zip.display(), archive_name),
        None => String::new(),
    };
    let script = format!(
        "#!/bin/sh\n\
         printf '%s\\n' \"$@\" > '{record}/args.txt'\n\
         printf '%s\\n%s\\n' \"$KAGGLE_USERNAME\" \"$KAGGLE_KEY\" > '{record}/env.txt'\n\
         {copy_line}\
         exit {exit_code}\n",
        record = record_dir.display(),
    );

    fs::write(script_path, script).unwrap();
    fs::set_permissions(script_path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Archive contents shaped like the image dataset the tool downloads by default
#[allow(dead_code)]
pub const SAMPLE_DATASET_FILES: &[(&str, &str)] = &[
    ("Snake Images/", ""),
    ("Snake Images/train/Venomous/001.jpg", "venomous-1"),
    ("Snake Images/train/Non Venomous/001.jpg", "non-venomous-1"),
    ("Snake Images/test/Venomous/002.jpg", "venomous-2"),
    ("labels.csv", "file,label\n001.jpg,venomous\n"),
];
