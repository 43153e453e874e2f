//! CMake invocation: generator selection and command assembly

pub mod cmake;
pub mod generator;

pub use cmake::{BuildType, CMakeConfig};
