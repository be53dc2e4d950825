//! Inventory collection.
//!
//! Two collectors feed the document: `apps` builds one record per package
//! in the index, `device` builds the build-constants record. Per-package
//! provider failures are absorbed here; device failures are fatal.

pub mod apps;
pub mod device;
pub mod types;

pub use types::{AppRecord, DeviceRecord};
