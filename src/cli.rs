//! CLI argument parsing using clap derive macros

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{value_parser, Parser};

use crate::build::generator::default_generator;
use crate::build::{BuildType, CMakeConfig};
use crate::exec::subprocess::run_command;
use crate::utils::paths::{executable_dir, resolve_directory, DirectoryValueParser};
use crate::utils::{shell, terminal};

/// Installation prefix used when `--prefix` is not given
pub const DEFAULT_PREFIX: &str = "/usr/local";

/// Environment variable naming the CMake source directory
pub const SOURCE_DIR_ENV: &str = "CONFIGURE_SOURCE_DIR";

/// Configure a CMake project
///
/// Builds a `cmake` configure command from the options below, prints it to
/// stderr and runs it. Arguments after the options are passed to CMake as-is.
#[derive(Parser, Debug)]
#[command(name = "configure")]
#[command(author, version, about, long_about = None)]
#[command(args_override_self = true)]
pub struct Cli {
    /// The installation prefix [default: /usr/local]
    #[arg(long, value_name = "PATH", value_parser = DirectoryValueParser)]
    pub prefix: Option<PathBuf>,

    /// The build system generator used by CMake [default: Ninja if found, else Unix Makefiles]
    #[arg(long, value_name = "GENERATOR")]
    pub build_generator: Option<String>,

    /// The C compiler to use [env: CC] [default: cc]
    #[arg(long, value_name = "PROGRAM", value_parser = value_parser!(OsString))]
    pub cc: Option<OsString>,

    /// The C++ compiler to use [env: CXX] [default: c++]
    #[arg(long, value_name = "PROGRAM", value_parser = value_parser!(OsString))]
    pub cxx: Option<OsString>,

    /// Configure a Debug build (default)
    #[arg(long, overrides_with = "release")]
    pub debug: bool,

    /// Configure a Release build
    #[arg(long, overrides_with = "debug")]
    pub release: bool,

    /// The CMake program to use [env: CMAKE] [default: cmake]
    #[arg(long, value_name = "PROGRAM", value_parser = value_parser!(OsString))]
    pub cmake: Option<OsString>,

    /// The CMake source directory [env: CONFIGURE_SOURCE_DIR] [default: directory containing this executable]
    #[arg(long, value_name = "DIR", value_parser = DirectoryValueParser)]
    pub source_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Extra arguments passed to CMake unchanged
    #[arg(
        value_name = "EXTRA_CMAKE_ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_parser = value_parser!(OsString)
    )]
    pub extra_cmake_args: Vec<OsString>,
}

/// Read an environment variable, treating set-but-empty as unset
fn non_empty_env(var: &str) -> Option<OsString> {
    std::env::var_os(var).filter(|value| !value.is_empty())
}

/// Explicit flag value, else the environment, else the built-in default
fn program_option(flag: &Option<OsString>, var: &str, default: &str) -> OsString {
    flag.clone()
        .or_else(|| non_empty_env(var))
        .unwrap_or_else(|| OsString::from(default))
}

impl Cli {
    /// Build type selected by `--debug` / `--release`, last one wins
    pub fn build_type(&self) -> BuildType {
        if self.release && !self.debug {
            BuildType::Release
        } else {
            BuildType::Debug
        }
    }

    /// Install prefix from `--prefix`, or the default after the same validation
    pub fn install_prefix(&self) -> Result<PathBuf> {
        match &self.prefix {
            Some(prefix) => Ok(prefix.clone()),
            None => Ok(resolve_directory(Path::new(DEFAULT_PREFIX))?),
        }
    }

    /// C compiler from `--cc`, `CC` or `cc`
    pub fn c_compiler(&self) -> OsString {
        program_option(&self.cc, "CC", "cc")
    }

    /// C++ compiler from `--cxx`, `CXX` or `c++`
    pub fn cxx_compiler(&self) -> OsString {
        program_option(&self.cxx, "CXX", "c++")
    }

    /// CMake program from `--cmake`, `CMAKE` or `cmake`
    pub fn cmake_program(&self) -> OsString {
        program_option(&self.cmake, "CMAKE", "cmake")
    }

    /// Source directory from `--source-dir`, the environment, or the executable's directory
    pub fn source_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.source_dir {
            return Ok(dir.clone());
        }
        match non_empty_env(SOURCE_DIR_ENV) {
            Some(dir) => Ok(resolve_directory(Path::new(&dir))?),
            None => Ok(executable_dir()?),
        }
    }

    /// Resolve the generator, probing the given `PATH` when none was requested
    pub fn generator<P: AsRef<OsStr>>(&self, paths: Option<P>) -> String {
        if let Some(generator) = &self.build_generator {
            return generator.clone();
        }

        let generator = default_generator(paths);
        if self.verbose {
            terminal::print_info(&format!("No --build-generator given, using {}", generator));
        }
        generator.to_string()
    }

    /// Resolve every option into a CMake configuration
    pub fn cmake_config<P: AsRef<OsStr>>(&self, paths: Option<P>) -> Result<CMakeConfig> {
        Ok(CMakeConfig::new(self.cmake_program(), self.source_dir()?)
            .generator(self.generator(paths))
            .build_type(self.build_type())
            .install_prefix(self.install_prefix()?)
            .c_compiler(self.c_compiler())
            .cxx_compiler(self.cxx_compiler())
            .extra_args(self.extra_cmake_args.iter().cloned()))
    }

    /// Run CMake and return the exit code to terminate with
    pub fn execute(self) -> Result<i32> {
        if self.no_color {
            terminal::disable_colors();
        }

        let config = self.cmake_config(std::env::var_os("PATH"))?;
        let command = config.to_command();

        terminal::print_trace(&shell::join(&command));

        let result = run_command(&command[0], &command[1..])?;

        if self.verbose {
            let outcome = if result.success {
                "succeeded".to_string()
            } else {
                format!("failed with exit code {}", result.exit_code)
            };
            terminal::print_info(&format!(
                "{} configure ({}) {} after {:.2?}",
                command[0].to_string_lossy(),
                config.generator_name(),
                outcome,
                result.duration
            ));
        }

        Ok(result.exit_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serial_test::serial;
    use tempfile::TempDir;

    const ENV_VARS: [&str; 4] = ["CC", "CXX", "CMAKE", SOURCE_DIR_ENV];

    /// Run `f` with the option env vars cleared except `vars`, restoring them afterwards
    fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
        let saved: Vec<_> = ENV_VARS.iter().map(|k| (*k, std::env::var_os(k))).collect();
        for key in ENV_VARS {
            std::env::remove_var(key);
        }
        for (key, value) in vars {
            std::env::set_var(key, value);
        }

        let result = f();

        for (key, value) in saved {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
        result
    }

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["configure"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    #[serial]
    fn test_defaults() {
        let temp_dir = TempDir::new().unwrap();
        with_env(&[], || {
            let cli = parse(&["--prefix", temp_dir.path().to_str().unwrap()]);

            assert_eq!(cli.build_type(), BuildType::Debug);
            assert_eq!(cli.install_prefix().unwrap(), std::fs::canonicalize(temp_dir.path()).unwrap());
            assert_eq!(cli.c_compiler(), "cc");
            assert_eq!(cli.cxx_compiler(), "c++");
            assert_eq!(cli.cmake_program(), "cmake");
            assert!(cli.build_generator.is_none());
            assert!(cli.source_dir.is_none());
            assert!(cli.extra_cmake_args.is_empty());
        });
    }

    #[test]
    fn test_release_flag() {
        let cli = parse(&["--prefix", ".", "--release"]);
        assert_eq!(cli.build_type(), BuildType::Release);
    }

    #[test]
    fn test_debug_release_last_wins() {
        let cli = parse(&["--prefix", ".", "--debug", "--release"]);
        assert_eq!(cli.build_type(), BuildType::Release);

        let cli = parse(&["--prefix", ".", "--release", "--debug"]);
        assert_eq!(cli.build_type(), BuildType::Debug);
    }

    #[test]
    #[serial]
    fn test_compilers_from_env() {
        with_env(
            &[("CC", "clang"), ("CXX", "clang++"), ("CMAKE", "/opt/cmake/bin/cmake")],
            || {
                let cli = parse(&["--prefix", "."]);
                assert_eq!(cli.c_compiler(), "clang");
                assert_eq!(cli.cxx_compiler(), "clang++");
                assert_eq!(cli.cmake_program(), "/opt/cmake/bin/cmake");
            },
        );
    }

    #[test]
    #[serial]
    fn test_empty_env_falls_back_to_default() {
        with_env(&[("CC", ""), ("CXX", ""), ("CMAKE", "")], || {
            let cli = parse(&["--prefix", "."]);
            assert_eq!(cli.c_compiler(), "cc");
            assert_eq!(cli.cxx_compiler(), "c++");
            assert_eq!(cli.cmake_program(), "cmake");

            let empty_path = TempDir::new().unwrap();
            let source = TempDir::new().unwrap();
            let cli = parse(&["--prefix", ".", "--source-dir", source.path().to_str().unwrap()]);
            let command = cli.cmake_config(Some(empty_path.path())).unwrap().to_command();
            assert_eq!(command[0], "cmake");
            assert_eq!(command[7], "-DCMAKE_C_COMPILER=cc");
            assert_eq!(command[8], "-DCMAKE_CXX_COMPILER=c++");
        });
    }

    #[test]
    #[serial]
    fn test_flag_beats_env() {
        with_env(&[("CC", "clang")], || {
            let cli = parse(&["--prefix", ".", "--cc", "gcc"]);
            assert_eq!(cli.c_compiler(), "gcc");
        });
    }

    #[test]
    #[serial]
    fn test_source_dir_from_env() {
        let source = TempDir::new().unwrap();
        with_env(&[(SOURCE_DIR_ENV, source.path().to_str().unwrap())], || {
            let cli = parse(&["--prefix", "."]);
            assert_eq!(
                cli.source_dir().unwrap(),
                std::fs::canonicalize(source.path()).unwrap()
            );
        });

        let missing = source.path().join("missing");
        with_env(&[(SOURCE_DIR_ENV, missing.to_str().unwrap())], || {
            let cli = parse(&["--prefix", "."]);
            let err = cli.source_dir().unwrap_err();
            assert!(err.to_string().contains("does not exist"));
        });
    }

    #[test]
    fn test_repeated_option_last_wins() {
        let cli = parse(&["--prefix", ".", "--cc", "gcc", "--cc", "clang"]);
        assert_eq!(cli.c_compiler(), "clang");
    }

    #[test]
    fn test_extra_args_after_separator() {
        let cli = parse(&["--prefix", ".", "--", "-DFOO=1", "--fresh", "-DBAR=2"]);
        assert_eq!(cli.extra_cmake_args, vec!["-DFOO=1", "--fresh", "-DBAR=2"]);
    }

    #[test]
    fn test_extra_args_without_separator() {
        let cli = parse(&["--prefix", ".", "--release", "-DFOO=1", "-DBAR=2"]);
        assert_eq!(cli.build_type(), BuildType::Release);
        assert_eq!(cli.extra_cmake_args, vec!["-DFOO=1", "-DBAR=2"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_extra_args_and_prefix() {
        use std::os::unix::ffi::{OsStrExt, OsStringExt};

        let temp_dir = TempDir::new().unwrap();
        let prefix = temp_dir.path().join(OsStr::from_bytes(b"pre\xfffix"));
        std::fs::create_dir(&prefix).unwrap();

        let argv: Vec<OsString> = vec![
            "configure".into(),
            "--prefix".into(),
            prefix.clone().into_os_string(),
            "--".into(),
            OsString::from_vec(b"-DX=\xff".to_vec()),
        ];
        let cli = Cli::try_parse_from(argv).unwrap();

        assert_eq!(cli.prefix, Some(std::fs::canonicalize(&prefix).unwrap()));
        assert_eq!(cli.extra_cmake_args.len(), 1);
        assert_eq!(cli.extra_cmake_args[0].as_bytes(), b"-DX=\xff");
    }

    #[test]
    fn test_prefix_default() {
        let cli = parse(&[]);
        assert!(cli.prefix.is_none());
        match cli.install_prefix() {
            Ok(prefix) => assert_eq!(prefix, std::fs::canonicalize(DEFAULT_PREFIX).unwrap()),
            Err(err) => assert!(err.to_string().contains(DEFAULT_PREFIX)),
        }
    }

    #[test]
    fn test_prefix_must_exist() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        let result = Cli::try_parse_from(["configure", "--prefix", missing.to_str().unwrap()]);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    #[serial]
    fn test_cmake_config_with_default_generator() {
        let temp_dir = TempDir::new().unwrap();
        let source = TempDir::new().unwrap();
        let empty_path = TempDir::new().unwrap();

        let command = with_env(&[], || {
            let cli = parse(&[
                "--prefix",
                temp_dir.path().to_str().unwrap(),
                "--source-dir",
                source.path().to_str().unwrap(),
                "--",
                "-DFOO=1",
                "-DBAR=2",
            ]);
            cli.cmake_config(Some(empty_path.path())).unwrap().to_command()
        });

        let source_dir = std::fs::canonicalize(source.path()).unwrap();
        let prefix = std::fs::canonicalize(temp_dir.path()).unwrap();
        let mut install_prefix = OsString::from("-DCMAKE_INSTALL_PREFIX=");
        install_prefix.push(&prefix);

        assert_eq!(command[0], "cmake");
        assert_eq!(command[1], source_dir.into_os_string());
        assert_eq!(command[2], "--warn-uninitialized");
        assert_eq!(command[3], "--no-warn-unused-cli");
        assert_eq!(command[4], "-GUnix Makefiles");
        assert_eq!(command[5], "-DCMAKE_BUILD_TYPE=Debug");
        assert_eq!(command[6], install_prefix);
        assert_eq!(&command[command.len() - 2..], &["-DFOO=1", "-DBAR=2"]);
    }

    #[test]
    fn test_explicit_generator_skips_search() {
        let cli = parse(&["--prefix", ".", "--build-generator", "Xcode"]);
        assert_eq!(cli.generator::<&OsStr>(None), "Xcode");
    }
}
