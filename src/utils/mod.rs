//! Shared helpers: paths, shell quoting, terminal output and tool lookup

pub mod paths;
pub mod shell;
pub mod terminal;
pub mod tools;
