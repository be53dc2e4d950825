//! Host build-constants provider.
//!
//! The device block of the document is a walked constants tree rooted at
//! the platform's build-info type. On the host this is a static tree over
//! the compile-time platform constants plus crate build metadata, declared
//! here in a fixed order so the walked record is reproducible for a given
//! binary.

use crate::walk::{ConstantGroup, StaticGroup};

/// An opaque handle to the platform's nested constant hierarchy plus the
/// process architecture string.
pub trait BuildConstants {
    /// The process/OS architecture string. Read directly, never walked.
    fn arch(&self) -> String;

    /// Root of the build-constants tree, consumable only by the walker.
    fn build_root(&self) -> Box<dyn ConstantGroup>;
}

/// Build constants of the running host binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostPlatform;

impl BuildConstants for HostPlatform {
    fn arch(&self) -> String {
        std::env::consts::ARCH.to_string()
    }

    fn build_root(&self) -> Box<dyn ConstantGroup> {
        Box::new(
            StaticGroup::new("Build")
                .constant("OS", std::env::consts::OS)
                .constant("FAMILY", std::env::consts::FAMILY)
                .constant("ARCH", std::env::consts::ARCH)
                .constant("DLL_SUFFIX", std::env::consts::DLL_SUFFIX)
                .constant("EXE_SUFFIX", std::env::consts::EXE_SUFFIX)
                .group(
                    StaticGroup::new("Build.VERSION")
                        .constant("CRATE", env!("CARGO_PKG_VERSION"))
                        .constant("MAJOR", parse_version_part(env!("CARGO_PKG_VERSION_MAJOR")))
                        .constant("MINOR", parse_version_part(env!("CARGO_PKG_VERSION_MINOR")))
                        .constant("PATCH", parse_version_part(env!("CARGO_PKG_VERSION_PATCH"))),
                ),
        )
    }
}

fn parse_version_part(part: &str) -> i64 {
    part.parse().unwrap_or(-1)
}
