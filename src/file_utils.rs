use std::fs;
use std::path::{Path, PathBuf};

/// Whether an entry name carries the `.mp3` suffix, ignoring case.
pub fn is_mp3_name(name: &str) -> bool {
    name.to_lowercase().ends_with(".mp3")
}

/// List the immediate entries of `dir` whose names end in `.mp3`.
///
/// Order is whatever the filesystem yields; subdirectories are not entered.
pub fn list_mp3_entries(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if is_mp3_name(&entry.file_name().to_string_lossy()) {
            entries.push(entry.path());
        }
    }
    Ok(entries)
}
