//! Manifest-backed package index.
//!
//! Host-side glue implementing [`PackageIndex`] over a JSON manifest. On
//! the original platform the package index is handed to the process by the
//! OS; on a generic host it arrives as a document:
//!
//! ```json
//! {
//!   "packages": [
//!     {
//!       "uid": 10050,
//!       "pkg": "com.example",
//!       "installed": true,
//!       "system": false,
//!       "label": "Example",
//!       "vcode": 3,
//!       "vname": "1.2",
//!       "certs": ["<base64 DER>"],
//!       "installer": "com.android.vending"
//!     }
//!   ]
//! }
//! ```
//!
//! Optional fields model the per-package platform calls: an entry without
//! `vcode` behaves like a package whose extended-info call fails, an entry
//! without `label` like one whose label resolution fails. A manifest that
//! does not parse is a fatal configuration error, surfaced before any
//! output is produced.

use super::{ExtendedInfo, PackageHandle, PackageIndex};
use al_common::{Error, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

fn default_installed() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    packages: Vec<ManifestPackage>,
}

#[derive(Debug, Deserialize)]
struct ManifestPackage {
    uid: i64,
    pkg: String,
    #[serde(default = "default_installed")]
    installed: bool,
    #[serde(default)]
    system: bool,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    vcode: Option<i64>,
    #[serde(default)]
    vname: Option<String>,
    /// Base64-encoded DER certificates. Absent key means the platform has
    /// no signing data; an empty list means signing data with no entries.
    #[serde(default)]
    certs: Option<Vec<String>>,
    #[serde(default)]
    installer: Option<String>,
}

/// A [`PackageIndex`] read once from a JSON manifest.
#[derive(Debug, Default)]
pub struct ManifestIndex {
    packages: Vec<ManifestPackage>,
}

impl ManifestIndex {
    /// Load a manifest from disk. Parse failures are fatal configuration
    /// errors.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read manifest {}: {e}", path.display()))
        })?;
        let manifest: Manifest = serde_json::from_str(&text).map_err(|e| {
            Error::Config(format!("malformed manifest {}: {e}", path.display()))
        })?;
        debug!(
            path = %path.display(),
            packages = manifest.packages.len(),
            "loaded package manifest"
        );
        Ok(ManifestIndex {
            packages: manifest.packages,
        })
    }

    /// An index with no packages (no manifest configured).
    pub fn empty() -> Self {
        ManifestIndex::default()
    }

    fn find(&self, pkg: &str) -> Result<&ManifestPackage> {
        self.packages
            .iter()
            .find(|entry| entry.pkg == pkg)
            .ok_or_else(|| Error::Provider(format!("package not in index: {pkg}")))
    }
}

impl PackageIndex for ManifestIndex {
    fn list_packages(&self, include_uninstalled: bool) -> Result<Vec<PackageHandle>> {
        Ok(self
            .packages
            .iter()
            .filter(|entry| include_uninstalled || entry.installed)
            .map(|entry| PackageHandle {
                uid: entry.uid,
                pkg: entry.pkg.clone(),
                installed: entry.installed,
                system: entry.system,
            })
            .collect())
    }

    fn extended_info(&self, pkg: &str) -> Result<ExtendedInfo> {
        let entry = self.find(pkg)?;
        let vcode = entry.vcode.ok_or_else(|| {
            Error::Provider(format!("no extended info recorded for {pkg}"))
        })?;
        let signing_certs = match &entry.certs {
            None => None,
            Some(encoded) => {
                let mut certs = Vec::with_capacity(encoded.len());
                for cert in encoded {
                    let der = BASE64.decode(cert).map_err(|e| {
                        Error::Provider(format!("invalid certificate for {pkg}: {e}"))
                    })?;
                    certs.push(der);
                }
                Some(certs)
            }
        };
        Ok(ExtendedInfo {
            vcode,
            vname: entry.vname.clone(),
            signing_certs,
        })
    }

    fn resolve_label(&self, handle: &PackageHandle) -> Result<String> {
        let entry = self.find(&handle.pkg)?;
        entry
            .label
            .clone()
            .ok_or_else(|| Error::Provider(format!("no label recorded for {}", handle.pkg)))
    }

    fn resolve_installer(&self, pkg: &str) -> Result<Option<String>> {
        let entry = self.find(pkg)?;
        Ok(entry.installer.clone())
    }
}
