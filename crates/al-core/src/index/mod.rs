//! Package index boundary.
//!
//! The platform that owns the installed-package index is reached through
//! this narrow trait. The core never enumerates packages itself; it asks
//! the provider for handles and then makes per-package calls that may fail
//! independently (the collector absorbs those failures).

pub mod manifest;

pub use manifest::ManifestIndex;

use al_common::Result;

/// One entry in the platform's installed-package index.
///
/// These fields are treated as always available: a handle that cannot
/// report them is malformed and the provider must not produce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageHandle {
    /// Kernel-assigned application uid.
    pub uid: i64,
    /// Package name, unique key of the apps block.
    pub pkg: String,
    /// Whether the package is currently installed. `false` means the index
    /// holds residual data only.
    pub installed: bool,
    /// Whether the package is part of the system image.
    pub system: bool,
}

/// Extended package info: version and signing data.
#[derive(Debug, Clone, Default)]
pub struct ExtendedInfo {
    pub vcode: i64,
    pub vname: Option<String>,
    /// Raw DER signing certificates, in signing order. `None` when the
    /// platform reports no signing data for the package.
    pub signing_certs: Option<Vec<Vec<u8>>>,
}

/// The platform's installed-package index.
///
/// `list_packages` failing is a document-level collection error. The
/// per-package calls are best-effort: a failure affects only the fields
/// derived from that call.
pub trait PackageIndex {
    /// Enumerate package handles in index order.
    fn list_packages(&self, include_uninstalled: bool) -> Result<Vec<PackageHandle>>;

    /// Fetch version and signing info for an installed package.
    fn extended_info(&self, pkg: &str) -> Result<ExtendedInfo>;

    /// Resolve the human-readable label for a handle.
    fn resolve_label(&self, handle: &PackageHandle) -> Result<String>;

    /// Resolve the install-source package name. The platform exposes two
    /// version-dependent call shapes for this; they collapse to this one
    /// operation. `Ok(None)` means the source is genuinely unknown.
    fn resolve_installer(&self, pkg: &str) -> Result<Option<String>>;
}
