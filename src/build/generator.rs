//! Default CMake generator selection

use std::ffi::OsStr;

use crate::utils::tools::which_in;

/// Generator used when `ninja` is available
pub const NINJA: &str = "Ninja";

/// Generator used otherwise
pub const UNIX_MAKEFILES: &str = "Unix Makefiles";

/// Pick the default generator for the given `PATH` value
///
/// A failed search is not an error: it only means Make is used instead.
pub fn default_generator<P: AsRef<OsStr>>(paths: Option<P>) -> &'static str {
    match which_in("ninja", paths) {
        Ok(_) => NINJA,
        Err(_) => UNIX_MAKEFILES,
    }
}
