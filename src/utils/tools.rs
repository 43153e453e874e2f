//! Tool detection
//!
//! Executable search mirrors the shell's view of `PATH`: a candidate counts
//! only if the OS grants execute permission on it, not merely if it exists.

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::error::ConfigureError;

/// Find an executable using an explicit `PATH` value
///
/// A command that is itself an executable path (absolute, or relative to the
/// current directory) is returned unchanged. Otherwise each `PATH` entry is
/// tried in order and the first executable `entry/command` wins.
pub fn which_in<P: AsRef<OsStr>>(
    command: &str,
    paths: Option<P>,
) -> Result<PathBuf, ConfigureError> {
    let candidate = Path::new(command);
    if is_executable(candidate) {
        return Ok(candidate.to_path_buf());
    }

    let paths = paths.as_ref().map(|p| p.as_ref()).unwrap_or_default();
    env::split_paths(paths)
        .map(|dir| dir.join(command))
        .find(|path| is_executable(path))
        .ok_or_else(|| ConfigureError::not_found(command))
}

/// Check whether the OS grants execute permission on a path
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    rustix::fs::access(path, rustix::fs::Access::EXEC_OK).is_ok()
}

/// Check whether the OS grants execute permission on a path
#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}
