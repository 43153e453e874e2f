//! Error types and helpers for user-friendly error messages
//!
//! Every failure that stops `configure` before or while launching CMake is a
//! [`ConfigureError`]. Each variant knows the exit status it maps to and, where
//! one exists, an actionable hint.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Exit status used when the program to launch cannot be found
pub const EXIT_NOT_FOUND: i32 = 127;

/// Exit status used when the program exists but cannot be launched
pub const EXIT_CANNOT_EXECUTE: i32 = 126;

/// Custom error types with helpful context and suggestions
#[derive(Error, Debug)]
pub enum ConfigureError {
    /// A directory option points at nothing
    #[error("Directory \"{}\" does not exist", path.display())]
    DirectoryNotFound { path: PathBuf },

    /// A directory option points at something that is not a directory
    #[error("Directory \"{}\" is a file", path.display())]
    NotADirectory { path: PathBuf },

    /// A path exists but could not be made absolute
    #[error("Failed to resolve \"{}\"", path.display())]
    Resolve {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Executable search exhausted PATH
    #[error("Couldn't find {command}")]
    NotFound { command: String },

    /// An executable path that has no parent directory
    #[error("Executable \"{}\" has no parent directory", path.display())]
    NoParentDirectory { path: PathBuf },

    /// The location of the running executable is unknown
    #[error("Could not determine the directory containing this executable")]
    CurrentExe {
        #[source]
        source: io::Error,
    },

    /// The configure command could not be started at all
    #[error("Failed to execute {program}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
        hint: Option<String>,
    },
}

impl ConfigureError {
    /// Create a "not found" error for an executable search
    pub fn not_found(command: impl Into<String>) -> Self {
        Self::NotFound {
            command: command.into(),
        }
    }

    /// Create a launch error, attaching an install hint when the program is missing
    pub fn launch(program: impl Into<String>, source: io::Error) -> Self {
        let program = program.into();
        let hint = match source.kind() {
            io::ErrorKind::NotFound => Some(hints::missing_program(&program)),
            io::ErrorKind::PermissionDenied => Some(hints::not_executable(&program)),
            _ => None,
        };
        Self::Launch {
            program,
            source,
            hint,
        }
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ConfigureError::Launch { source, .. } if source.kind() == io::ErrorKind::NotFound => {
                EXIT_NOT_FOUND
            }
            ConfigureError::Launch { .. } => EXIT_CANNOT_EXECUTE,
            ConfigureError::NotFound { .. } => EXIT_NOT_FOUND,
            _ => 1,
        }
    }

    /// Display error with formatting and hints
    pub fn display_with_hints(&self) {
        use console::style;

        eprintln!("{} {}", style("error:").red().bold(), self);

        match self {
            ConfigureError::Resolve { source, .. }
            | ConfigureError::CurrentExe { source } => {
                eprintln!("  {} {}", style("caused by:").dim(), source);
            }
            ConfigureError::Launch { source, hint, .. } => {
                eprintln!("  {} {}", style("caused by:").dim(), source);
                if let Some(h) = hint {
                    eprintln!("{} {}", style("hint:").yellow().bold(), h);
                }
            }
            _ => {}
        }
    }
}

/// Common error hints
pub mod hints {
    /// Get hint for a program that could not be found
    pub fn missing_program(program: &str) -> String {
        if is_cmake(program) {
            format!(
                "{} was not found. Install CMake from https://cmake.org/ or use your package manager:\n\
                 • macOS: brew install cmake\n\
                 • Ubuntu: sudo apt install cmake\n\
                 Or point --cmake (or the CMAKE environment variable) at an existing binary.",
                program
            )
        } else {
            format!("{} was not found. Install it and ensure it's in your PATH", program)
        }
    }

    /// Get hint for a program that exists but is not executable
    pub fn not_executable(program: &str) -> String {
        format!("{} exists but is not executable. Check its permissions", program)
    }

    fn is_cmake(program: &str) -> bool {
        std::path::Path::new(program)
            .file_stem()
            .map(|stem| stem == "cmake")
            .unwrap_or(false)
    }
}
