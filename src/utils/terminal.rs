//! Terminal output utilities
//!
//! All diagnostics go to stderr so that stdout belongs to CMake alone.

use console::style;

/// Print an error message to stderr
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("error:").red().bold(), message);
}

/// Print an info message to stderr
pub fn print_info(message: &str) {
    eprintln!("{} {}", style("info:").blue().bold(), message);
}

/// Print the shell trace of a command, `sh -x` style
pub fn print_trace(line: &str) {
    eprintln!("+ {}", line);
}

/// Disable styling on both output streams
pub fn disable_colors() {
    console::set_colors_enabled(false);
    console::set_colors_enabled_stderr(false);
}
