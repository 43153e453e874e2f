//! configure - run a CMake configure step with sensible defaults
//!
//! Resolves build options (prefix, generator, compilers, build type), echoes
//! the resulting `cmake` command line to stderr and runs it, exiting with
//! CMake's own status.
//!
//! ## Architecture
//!
//! ```text
//! cli (clap) → build::CMakeConfig → utils::shell trace → exec::subprocess → exit code
//! ```

mod build;
mod cli;
mod error;
mod exec;
mod utils;

use std::process;

use clap::Parser;

use cli::Cli;
use error::ConfigureError;
use utils::terminal;

fn main() {
    let cli = Cli::parse();

    let code = match cli.execute() {
        Ok(code) => code,
        Err(err) => match err.downcast_ref::<ConfigureError>() {
            Some(e) => {
                e.display_with_hints();
                e.exit_code()
            }
            None => {
                terminal::print_error(&format!("{:#}", err));
                1
            }
        },
    };

    process::exit(code);
}
