//! Device metadata collector.
//!
//! The architecture string is read directly; the build block is produced
//! by walking the platform's constants root. Unlike app collection this is
//! all-or-nothing: a document without a device block is useless, so any
//! failure here is fatal to the run.

use super::types::DeviceRecord;
use crate::platform::BuildConstants;
use crate::walk::{Raw, Walker};
use al_common::{Error, Result, Value};
use tracing::debug;

/// Collect the device record.
pub fn collect(platform: &dyn BuildConstants, walker: &Walker) -> Result<DeviceRecord> {
    let arch = platform.arch();
    let build = walker.walk(&Raw::Group(platform.build_root()));
    match &build {
        Value::Record(rec) => {
            debug!(arch = %arch, constants = rec.len(), "collected device record")
        }
        _ => {
            return Err(Error::Collection(
                "build constants did not produce a record".into(),
            ))
        }
    }
    Ok(DeviceRecord { arch, build })
}
