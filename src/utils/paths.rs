//! Path utilities for directory options

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use clap::builder::TypedValueParser;
use clap::error::ErrorKind;

use crate::error::ConfigureError;

/// clap value parser for directory options
///
/// The value must exist and must not be a file. It is returned as an absolute
/// path with symlinks resolved. Non-UTF-8 paths are accepted as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryValueParser;

impl TypedValueParser for DirectoryValueParser {
    type Value = PathBuf;

    fn parse_ref(
        &self,
        cmd: &clap::Command,
        arg: Option<&clap::Arg>,
        value: &OsStr,
    ) -> Result<Self::Value, clap::Error> {
        resolve_directory(Path::new(value)).map_err(|err| {
            let arg = arg
                .map(|a| a.to_string())
                .unwrap_or_else(|| "...".to_string());
            clap::Error::raw(
                ErrorKind::ValueValidation,
                format!(
                    "invalid value '{}' for '{}': {}\n",
                    value.to_string_lossy(),
                    arg,
                    err
                ),
            )
            .with_cmd(cmd)
        })
    }
}

/// Validate and canonicalize a directory path
pub fn resolve_directory(path: &Path) -> Result<PathBuf, ConfigureError> {
    if !path.exists() {
        return Err(ConfigureError::DirectoryNotFound {
            path: path.to_path_buf(),
        });
    }
    if !path.is_dir() {
        return Err(ConfigureError::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    std::fs::canonicalize(path).map_err(|source| ConfigureError::Resolve {
        path: path.to_path_buf(),
        source,
    })
}

/// Directory containing the running executable
pub fn executable_dir() -> Result<PathBuf, ConfigureError> {
    let exe = std::env::current_exe().map_err(|source| ConfigureError::CurrentExe { source })?;
    let exe = std::fs::canonicalize(&exe).map_err(|source| ConfigureError::Resolve {
        path: exe.clone(),
        source,
    })?;

    parent_dir(&exe)
}

/// Parent directory of an executable path
fn parent_dir(exe: &Path) -> Result<PathBuf, ConfigureError> {
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| ConfigureError::NoParentDirectory {
            path: exe.to_path_buf(),
        })
}
