//! Executable lookup on PATH plus extra directories.

use std::env;
use std::path::{Path, PathBuf};

/// Locate `program`. Names containing a separator are checked as
/// paths; bare names are searched on PATH and then in `extra_dirs`.
/// On Windows the usual executable extensions are tried as well.
pub fn find_program(program: &str, extra_dirs: &[PathBuf]) -> Option<PathBuf> {
    let candidates: Vec<String> = if cfg!(windows) {
        ["", ".exe", ".cmd", ".bat"]
            .iter()
            .map(|ext| format!("{program}{ext}"))
            .collect()
    } else {
        vec![program.to_string()]
    };

    if program.contains(['/', '\\']) {
        return candidates
            .iter()
            .map(PathBuf::from)
            .find(|p| p.is_file());
    }

    let path_dirs = env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).collect::<Vec<_>>())
        .unwrap_or_default();
    for dir in path_dirs.iter().map(PathBuf::as_path).chain(extra_dirs.iter().map(PathBuf::as_path)) {
        for candidate in &candidates {
            let full = dir.join(candidate);
            if is_executable(&full) {
                return Some(full);
            }
        }
    }
    None
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.is_file()
        && path
            .metadata()
            .map(|m| m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
