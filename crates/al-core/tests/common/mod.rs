//! Shared fixtures for integration tests: an in-memory package index with
//! scriptable per-package failures, and a fixed build-constants platform.

#![allow(dead_code)]

use al_common::{Error, Result};
use al_core::index::{ExtendedInfo, PackageHandle, PackageIndex};
use al_core::platform::BuildConstants;
use al_core::run::Orchestrator;
use al_core::walk::{ConstantGroup, StaticGroup, Walker};

/// One scripted package: `None` in an optional slot makes the matching
/// provider call fail for that package.
pub struct MockPackage {
    pub handle: PackageHandle,
    pub label: Option<String>,
    pub info: Option<ExtendedInfo>,
    /// `None` = resolve_installer fails; `Some(inner)` = call succeeds
    /// with `inner`.
    pub installer: Option<Option<String>>,
}

impl MockPackage {
    pub fn installed(uid: i64, pkg: &str) -> Self {
        MockPackage {
            handle: PackageHandle {
                uid,
                pkg: pkg.into(),
                installed: true,
                system: false,
            },
            label: Some(format!("Label {pkg}")),
            info: Some(ExtendedInfo {
                vcode: 1,
                vname: Some("1.0".into()),
                signing_certs: Some(vec![pkg.as_bytes().to_vec()]),
            }),
            installer: Some(Some("com.android.vending".into())),
        }
    }

    pub fn removed(uid: i64, pkg: &str) -> Self {
        let mut p = MockPackage::installed(uid, pkg);
        p.handle.installed = false;
        p.info = None;
        p
    }
}

pub struct MockIndex(pub Vec<MockPackage>);

impl MockIndex {
    pub fn empty() -> Self {
        MockIndex(Vec::new())
    }

    fn find(&self, pkg: &str) -> Result<&MockPackage> {
        self.0
            .iter()
            .find(|p| p.handle.pkg == pkg)
            .ok_or_else(|| Error::Provider(format!("not indexed: {pkg}")))
    }
}

impl PackageIndex for MockIndex {
    fn list_packages(&self, include_uninstalled: bool) -> Result<Vec<PackageHandle>> {
        Ok(self
            .0
            .iter()
            .filter(|p| include_uninstalled || p.handle.installed)
            .map(|p| p.handle.clone())
            .collect())
    }

    fn extended_info(&self, pkg: &str) -> Result<ExtendedInfo> {
        self.find(pkg)?
            .info
            .clone()
            .ok_or_else(|| Error::Provider(format!("no info: {pkg}")))
    }

    fn resolve_label(&self, handle: &PackageHandle) -> Result<String> {
        self.find(&handle.pkg)?
            .label
            .clone()
            .ok_or_else(|| Error::Provider(format!("no label: {}", handle.pkg)))
    }

    fn resolve_installer(&self, pkg: &str) -> Result<Option<String>> {
        self.find(pkg)?
            .installer
            .clone()
            .ok_or_else(|| Error::Provider(format!("no installer: {pkg}")))
    }
}

/// A platform with a small fixed constants tree.
pub struct TestPlatform;

impl BuildConstants for TestPlatform {
    fn arch(&self) -> String {
        "arm64-v8a".into()
    }

    fn build_root(&self) -> Box<dyn ConstantGroup> {
        Box::new(
            StaticGroup::new("Build")
                .constant("MODEL", "widget-1")
                .constant("SDK", 33i64)
                .group(StaticGroup::new("Build.VERSION").constant("RELEASE", "13")),
        )
    }
}

/// Run a full document over `index` and return the emitted text.
pub fn emit_document(index: &dyn PackageIndex) -> String {
    let mut out = Vec::new();
    let mut orchestrator = Orchestrator::new(index, &TestPlatform, Walker::new());
    orchestrator.run(&mut out).expect("run should succeed");
    String::from_utf8(out).expect("document is UTF-8")
}
