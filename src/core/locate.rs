// Reestructura - core/locate.rs
//
// Input workbook location: a non-recursive scan of the base directory for
// filenames matching the input glob pattern.
//
// The original workflow keeps dated copies of the workbook next to the
// current one, so several files can match. Selection is deterministic:
// matches are sorted lexicographically by filename and the first is taken,
// with a warning naming the choice when more than one file matched.

use crate::util::constants;
use crate::util::error::LocateError;
use std::path::{Path, PathBuf};

/// Find the input workbook in `base_dir`.
///
/// Only the directory itself is searched; subdirectories are never entered.
/// Entries that cannot be read (permissions, broken links) are non-fatal and
/// logged. Returns `InputNotFound` when nothing matches.
pub fn find_input_file(base_dir: &Path) -> Result<PathBuf, LocateError> {
    let pattern =
        glob::Pattern::new(constants::INPUT_PATTERN).map_err(|e| LocateError::Pattern {
            pattern: constants::INPUT_PATTERN.to_string(),
            source: e,
        })?;

    tracing::debug!(
        dir = %base_dir.display(),
        pattern = constants::INPUT_PATTERN,
        "Locating input workbook"
    );

    let mut matches: Vec<PathBuf> = Vec::new();

    // min_depth(1) skips the root entry itself; max_depth(1) keeps the walk
    // non-recursive.
    let walker = walkdir::WalkDir::new(base_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false);

    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(e) => {
                // An error at depth 0 means the base directory itself is
                // unreadable; everything else is a skippable entry.
                if e.path() == Some(base_dir) {
                    let source = e.into_io_error().unwrap_or_else(|| {
                        std::io::Error::new(std::io::ErrorKind::Other, "directory walk failed")
                    });
                    return Err(LocateError::BaseDir {
                        path: base_dir.to_path_buf(),
                        source,
                    });
                }
                tracing::debug!(error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = match entry.file_name().to_str() {
            Some(n) => n,
            None => {
                tracing::debug!(
                    path = %entry.path().display(),
                    "Skipping non-UTF-8 filename"
                );
                continue;
            }
        };

        if pattern.matches(file_name) {
            matches.push(entry.into_path());
        }
    }

    if matches.is_empty() {
        return Err(LocateError::InputNotFound {
            dir: base_dir.to_path_buf(),
            pattern: constants::INPUT_PATTERN.to_string(),
        });
    }

    matches.sort_unstable_by(|a, b| a.file_name().cmp(&b.file_name()));
    let chosen = matches.remove(0);

    if !matches.is_empty() {
        tracing::warn!(
            chosen = %chosen.display(),
            others = matches.len(),
            "Multiple files match the input pattern; using lexicographically first"
        );
    }

    tracing::debug!(file = %chosen.display(), "Input workbook located");
    Ok(chosen)
}

// =============================================================================
// Tests
// =============================================================================
