use std::path::{Path, PathBuf};

use crate::error::CliError;

/// List the regular files directly inside `dir` whose path contains `filter`.
///
/// The match is a substring test on the full path, not an extension
/// comparison. Subdirectories are not visited and symbolic links are
/// followed. Entries are returned sorted by file name.
///
/// # Errors
///
/// [`CliError::Directory`] if `dir` is not a directory and [`CliError::Walk`]
/// if it cannot be listed. Entries that cannot be inspected, such as dangling
/// symbolic links, are logged and skipped.
pub fn find_files(dir: impl AsRef<Path>, filter: &str) -> Result<Vec<PathBuf>, CliError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(CliError::Directory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                log::warn!("Skipping unreadable entry: {e}");
                continue;
            }
        };
        let matches = entry
            .path()
            .to_str()
            .map(|path| path.contains(filter))
            .unwrap_or(false);

        if entry.file_type().is_file() && matches {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
