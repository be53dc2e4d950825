//! Record shapes emitted in the final document.

use al_common::{Record, Value};

/// One application record.
///
/// `vcode`, `vname`, and `signer` are populated only for installed
/// packages whose extended info resolved; otherwise they are `None` and
/// the emitter writes explicit nulls. Note the `signer` distinction: an
/// installed package whose signing info resolved but held no certificates
/// gets `Some("")`, never `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppRecord {
    pub uid: i64,
    pub pkg: String,
    /// Present in the index but not currently installed (residual data).
    pub removed: bool,
    pub system: bool,
    pub label: String,
    pub vcode: Option<i64>,
    pub vname: Option<String>,
    pub signer: Option<String>,
    pub installer: Option<String>,
}

impl AppRecord {
    /// Convert to the structural model with the fixed member order
    /// uid, pkg, removed, system, label, vcode, vname, signer, installer.
    pub fn to_value(&self) -> Value {
        let mut rec = Record::new();
        rec.insert("uid", Value::from(self.uid));
        rec.insert("pkg", Value::from(self.pkg.clone()));
        rec.insert("removed", Value::from(self.removed));
        rec.insert("system", Value::from(self.system));
        rec.insert("label", Value::from(self.label.clone()));
        rec.insert("vcode", Value::from(self.vcode));
        rec.insert("vname", Value::from(self.vname.clone()));
        rec.insert("signer", Value::from(self.signer.clone()));
        rec.insert("installer", Value::from(self.installer.clone()));
        Value::Record(rec)
    }
}

/// The device/build-constants record.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceRecord {
    pub arch: String,
    /// The recursively walked constants tree; always a `Value::Record`.
    pub build: Value,
}

impl DeviceRecord {
    pub fn to_value(&self) -> Value {
        let mut rec = Record::new();
        rec.insert("arch", Value::from(self.arch.clone()));
        rec.insert("build", self.build.clone());
        Value::Record(rec)
    }
}
