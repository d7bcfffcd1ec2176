//! Expansion of command-line paths into the list of files to probe.

use std::path::{Path, PathBuf};

use tracing::trace;
use walkdir::WalkDir;

use crate::error::DetectError;

/// Expand `paths` into files, in order.
///
/// Plain paths are passed through untouched, even if they do not exist, so
/// that opening them reports the failure. Directories are walked recursively
/// with entries sorted by file name. Entries that cannot be read while
/// walking are returned as errors in place.
pub fn collect_files<P: AsRef<Path>>(
    paths: &[P],
    follow_links: bool,
) -> Vec<Result<PathBuf, DetectError>> {
    let mut files = Vec::new();

    for path in paths {
        let path = path.as_ref();
        if !path.is_dir() {
            files.push(Ok(path.to_path_buf()));
            continue;
        }

        let walker = WalkDir::new(path)
            .follow_links(follow_links)
            .sort_by_file_name();

        for entry in walker {
            match entry {
                Ok(entry) if entry.file_type().is_file() => {
                    trace!(path = %entry.path().display(), "Found file");
                    files.push(Ok(entry.into_path()));
                }
                Ok(_) => {}
                Err(e) => {
                    let failed = e.path().unwrap_or(path).display().to_string();
                    files.push(Err(DetectError::unreadable(failed, e.to_string())));
                }
            }
        }
    }

    files
}
