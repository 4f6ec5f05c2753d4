// Reestructura - platform/paths.rs
//
// Base-directory resolution. The tool is distributed as a bare executable
// dropped into the folder holding the input workbook, so the base directory
// is the directory containing the running binary, not the process working
// directory.

use std::path::PathBuf;

/// Resolve the directory the pipeline operates in.
///
/// Uses the running executable's parent directory so installed-location runs
/// (double-click, shortcut) find the workbook sitting next to the binary.
/// Falls back to the process working directory when the executable path
/// cannot be resolved.
pub fn base_dir() -> PathBuf {
    match std::env::current_exe() {
        Ok(exe) => match exe.parent() {
            Some(dir) => {
                tracing::debug!(dir = %dir.display(), "Base directory resolved from executable");
                dir.to_path_buf()
            }
            None => fallback_dir(),
        },
        Err(e) => {
            tracing::warn!(error = %e, "Cannot resolve executable path, using working directory");
            fallback_dir()
        }
    }
}

fn fallback_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
