//! App metadata collector.
//!
//! Builds one [`AppRecord`] per handle in the package index, in index
//! order. Per-package provider failures never drop a record: the affected
//! fields become `None` (emitted as explicit nulls) and collection moves
//! on to the next package.

use super::types::AppRecord;
use crate::index::{PackageHandle, PackageIndex};
use al_common::{signer_digest, Result};
use tracing::{debug, warn};

/// Collect records for every package in the index, residual entries
/// included. Only the index listing itself can fail here.
pub fn collect(index: &dyn PackageIndex) -> Result<Vec<AppRecord>> {
    let handles = index.list_packages(true)?;
    debug!(count = handles.len(), "listed package handles");

    let mut records = Vec::with_capacity(handles.len());
    for handle in &handles {
        records.push(collect_one(index, handle));
    }
    Ok(records)
}

fn collect_one(index: &dyn PackageIndex, handle: &PackageHandle) -> AppRecord {
    let removed = !handle.installed;

    let label = match index.resolve_label(handle) {
        Ok(label) => label,
        Err(err) => {
            debug!(pkg = %handle.pkg, error = %err, "label unavailable, using package name");
            handle.pkg.clone()
        }
    };

    let mut vcode = None;
    let mut vname = None;
    let mut signer = None;
    if handle.installed {
        match index.extended_info(&handle.pkg) {
            Ok(info) => {
                vcode = Some(info.vcode);
                vname = info.vname;
                signer = Some(signer_digest(info.signing_certs.as_deref()));
            }
            Err(err) => {
                warn!(pkg = %handle.pkg, error = %err, "extended info unavailable");
            }
        }
    }

    // Attempted unconditionally, residual packages included: the install
    // source can outlive the package itself.
    let installer = match index.resolve_installer(&handle.pkg) {
        Ok(installer) => installer,
        Err(err) => {
            debug!(pkg = %handle.pkg, error = %err, "installer unavailable");
            None
        }
    };

    AppRecord {
        uid: handle.uid,
        pkg: handle.pkg.clone(),
        removed,
        system: handle.system,
        label,
        vcode,
        vname,
        signer,
        installer,
    }
}
