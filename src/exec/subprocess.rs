//! Subprocess execution with inherited standard streams

use std::ffi::{OsStr, OsString};
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use crate::error::ConfigureError;

/// Result of a subprocess execution
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded (exit code 0)
    pub success: bool,

    /// Process exit code; `128 + signal` when killed by a signal
    pub exit_code: i32,

    /// Execution duration
    pub duration: Duration,
}

impl CommandResult {
    /// Create a CommandResult from an exit status
    pub fn from_status(status: ExitStatus, duration: Duration) -> Self {
        Self {
            success: status.success(),
            exit_code: exit_code(status),
            duration,
        }
    }
}

/// Map an exit status to the code a shell would report
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

/// Run a program to completion, sharing stdin/stdout/stderr with it
pub fn run_command(program: &OsStr, args: &[OsString]) -> Result<CommandResult, ConfigureError> {
    let start = Instant::now();

    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| ConfigureError::launch(program.to_string_lossy(), e))?;

    Ok(CommandResult::from_status(status, start.elapsed()))
}
