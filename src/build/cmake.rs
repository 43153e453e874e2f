//! CMake configure command assembly
//!
//! [`CMakeConfig`] collects the resolved options and renders them into the
//! exact argument vector handed to the CMake executable.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

/// CMake build type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BuildType {
    #[default]
    Debug,
    Release,
}

impl std::fmt::Display for BuildType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildType::Debug => write!(f, "Debug"),
            BuildType::Release => write!(f, "Release"),
        }
    }
}

/// Flags passed to every configure run, right after the source directory
pub const FIXED_FLAGS: [&str; 2] = ["--warn-uninitialized", "--no-warn-unused-cli"];

/// CMake configuration builder
///
/// Programs, paths and extra arguments are kept as OS strings so that bytes
/// which are not valid UTF-8 reach CMake unchanged.
#[derive(Debug, Clone)]
pub struct CMakeConfig {
    /// CMake executable
    cmake: OsString,
    /// Source directory (where CMakeLists.txt is located)
    source_dir: PathBuf,
    /// Generator (e.g., "Ninja", "Unix Makefiles")
    generator: String,
    /// Build type
    build_type: BuildType,
    /// Install prefix
    install_prefix: PathBuf,
    /// C compiler
    c_compiler: OsString,
    /// C++ compiler
    cxx_compiler: OsString,
    /// Arguments appended verbatim
    extra_args: Vec<OsString>,
}

impl CMakeConfig {
    /// Create a new CMake configuration with the stock defaults
    pub fn new(cmake: impl Into<OsString>, source_dir: PathBuf) -> Self {
        Self {
            cmake: cmake.into(),
            source_dir,
            generator: super::generator::UNIX_MAKEFILES.to_string(),
            build_type: BuildType::Debug,
            install_prefix: PathBuf::from("/usr/local"),
            c_compiler: OsString::from("cc"),
            cxx_compiler: OsString::from("c++"),
            extra_args: Vec::new(),
        }
    }

    /// Set the generator
    pub fn generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = generator.into();
        self
    }

    /// Set the build type
    pub fn build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = build_type;
        self
    }

    /// Set the install prefix
    pub fn install_prefix(mut self, prefix: PathBuf) -> Self {
        self.install_prefix = prefix;
        self
    }

    /// Set the C compiler
    pub fn c_compiler(mut self, compiler: impl Into<OsString>) -> Self {
        self.c_compiler = compiler.into();
        self
    }

    /// Set the C++ compiler
    pub fn cxx_compiler(mut self, compiler: impl Into<OsString>) -> Self {
        self.cxx_compiler = compiler.into();
        self
    }

    /// Append arguments passed through to CMake unchanged
    pub fn extra_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Generator in use
    pub fn generator_name(&self) -> &str {
        &self.generator
    }

    /// Render the full command line, program first
    pub fn to_command(&self) -> Vec<OsString> {
        let mut command = Vec::with_capacity(10 + self.extra_args.len());

        command.push(self.cmake.clone());
        command.push(self.source_dir.clone().into_os_string());
        command.extend(FIXED_FLAGS.iter().map(OsString::from));

        command.push(OsString::from(format!("-G{}", self.generator)));
        command.push(OsString::from(format!("-DCMAKE_BUILD_TYPE={}", self.build_type)));
        command.push(define("CMAKE_INSTALL_PREFIX", self.install_prefix.as_os_str()));
        command.push(define("CMAKE_C_COMPILER", &self.c_compiler));
        command.push(define("CMAKE_CXX_COMPILER", &self.cxx_compiler));
        command.push(OsString::from("-DCMAKE_EXPORT_COMPILE_COMMANDS=1"));

        command.extend(self.extra_args.iter().cloned());
        command
    }
}

/// `-D<name>=<value>` without a round trip through UTF-8
fn define(name: &str, value: &OsStr) -> OsString {
    let mut arg = OsString::from(format!("-D{}=", name));
    arg.push(value);
    arg
}
