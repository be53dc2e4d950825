//! End-to-end document shape tests: full orchestrator runs over scripted
//! package indexes, asserting the emitted JSON against the documented
//! output contract.

mod common;

use al_common::signer_digest;
use al_core::index::ExtendedInfo;
use common::{emit_document, MockIndex, MockPackage};

fn parse(text: &str) -> serde_json::Value {
    serde_json::from_str(text).expect("document parses as JSON")
}

#[test]
fn empty_index_emits_device_and_empty_apps() {
    let text = emit_document(&MockIndex::empty());
    let doc = parse(&text);

    assert_eq!(doc["device"]["arch"], "arm64-v8a");
    assert_eq!(doc["device"]["build"]["MODEL"], "widget-1");
    assert_eq!(doc["device"]["build"]["VERSION"]["RELEASE"], "13");
    assert!(doc["apps"].as_object().expect("apps is an object").is_empty());
}

#[test]
fn installed_package_record_is_fully_populated() {
    let cert = b"first certificate".to_vec();
    let mut pkg = MockPackage::installed(10050, "com.example");
    pkg.label = Some("Example".into());
    pkg.info = Some(ExtendedInfo {
        vcode: 3,
        vname: Some("1.2".into()),
        signing_certs: Some(vec![cert.clone()]),
    });
    let text = emit_document(&MockIndex(vec![pkg]));
    let doc = parse(&text);

    let app = &doc["apps"]["com.example"];
    assert_eq!(app["uid"], 10050);
    assert_eq!(app["pkg"], "com.example");
    assert_eq!(app["removed"], false);
    assert_eq!(app["system"], false);
    assert_eq!(app["label"], "Example");
    assert_eq!(app["vcode"], 3);
    assert_eq!(app["vname"], "1.2");
    assert_eq!(app["installer"], "com.android.vending");

    let signer = app["signer"].as_str().expect("signer is a string");
    assert_eq!(signer.len(), 64);
    assert_eq!(signer, signer_digest(Some(&[cert])));
}

#[test]
fn app_record_member_order_is_fixed() {
    let text = emit_document(&MockIndex(vec![MockPackage::installed(1, "com.one")]));

    let names = [
        "\"uid\"", "\"pkg\"", "\"removed\"", "\"system\"", "\"label\"", "\"vcode\"",
        "\"vname\"", "\"signer\"", "\"installer\"",
    ];
    let positions: Vec<usize> = names
        .iter()
        .map(|n| text.find(n).unwrap_or_else(|| panic!("missing member {n}")))
        .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted, "member order deviates from contract");
}

#[test]
fn removed_package_has_null_version_fields() {
    let text = emit_document(&MockIndex(vec![MockPackage::removed(10002, "com.gone")]));
    let doc = parse(&text);

    let app = &doc["apps"]["com.gone"];
    assert_eq!(app["removed"], true);
    assert!(app["vcode"].is_null());
    assert!(app["vname"].is_null());
    assert!(app["signer"].is_null());
    // Installer resolution is attempted even for residual packages.
    assert_eq!(app["installer"], "com.android.vending");

    // Null members are present in the text, not omitted.
    assert!(text.contains("\"vcode\": null"));
    assert!(text.contains("\"vname\": null"));
    assert!(text.contains("\"signer\": null"));
}

#[test]
fn extended_info_failure_keeps_record_with_nulls() {
    let mut pkg = MockPackage::installed(10003, "com.flaky");
    pkg.info = None;
    let text = emit_document(&MockIndex(vec![pkg]));
    let doc = parse(&text);

    let app = &doc["apps"]["com.flaky"];
    assert_eq!(app["uid"], 10003);
    assert_eq!(app["label"], "Label com.flaky");
    assert_eq!(app["removed"], false);
    assert!(app["vcode"].is_null());
    assert!(app["vname"].is_null());
    assert!(app["signer"].is_null());
}

#[test]
fn signer_uses_first_certificate_only() {
    let first = b"cert A".to_vec();
    let mut one = MockPackage::installed(1, "com.one");
    one.info = Some(ExtendedInfo {
        vcode: 1,
        vname: None,
        signing_certs: Some(vec![first.clone()]),
    });
    let mut two = MockPackage::installed(2, "com.two");
    two.info = Some(ExtendedInfo {
        vcode: 1,
        vname: None,
        signing_certs: Some(vec![first.clone(), b"cert B, ignored".to_vec()]),
    });

    let doc = parse(&emit_document(&MockIndex(vec![one, two])));
    assert_eq!(doc["apps"]["com.one"]["signer"], doc["apps"]["com.two"]["signer"]);
    assert_eq!(doc["apps"]["com.one"]["signer"], signer_digest(Some(&[first])).as_str());
}

#[test]
fn missing_and_empty_cert_lists_digest_to_empty_string() {
    let mut absent = MockPackage::installed(1, "com.absent");
    absent.info = Some(ExtendedInfo {
        vcode: 1,
        vname: None,
        signing_certs: None,
    });
    let mut empty = MockPackage::installed(2, "com.empty");
    empty.info = Some(ExtendedInfo {
        vcode: 1,
        vname: None,
        signing_certs: Some(Vec::new()),
    });

    let doc = parse(&emit_document(&MockIndex(vec![absent, empty])));
    // "" and not null: signing info resolved, it just held no certificates.
    assert_eq!(doc["apps"]["com.absent"]["signer"], "");
    assert_eq!(doc["apps"]["com.empty"]["signer"], "");
}

#[test]
fn apps_block_preserves_index_order() {
    let index = MockIndex(vec![
        MockPackage::installed(3, "z.last.first"),
        MockPackage::installed(1, "a.alphabetically.first"),
        MockPackage::installed(2, "m.middle"),
    ]);
    let text = emit_document(&index);

    let z = text.find("\"z.last.first\"").unwrap();
    let a = text.find("\"a.alphabetically.first\"").unwrap();
    let m = text.find("\"m.middle\"").unwrap();
    assert!(z < a && a < m, "apps keys deviate from index order");
}

#[test]
fn duplicate_package_names_collapse_last_write_wins() {
    let mut early = MockPackage::installed(1, "com.dup");
    early.label = Some("Early".into());
    let mut late = MockPackage::installed(2, "com.dup");
    late.label = Some("Late".into());
    let index = MockIndex(vec![
        early,
        MockPackage::installed(5, "com.other"),
        late,
    ]);
    let text = emit_document(&index);
    let doc = parse(&text);

    assert_eq!(doc["apps"].as_object().unwrap().len(), 2);
    // Mock lookups key on package name, so scripted per-package calls all
    // resolve to the first entry; the last handle's identity still wins.
    assert_eq!(doc["apps"]["com.dup"]["uid"], 2);
    // First key position is kept.
    let dup = text.find("\"com.dup\"").unwrap();
    let other = text.find("\"com.other\"").unwrap();
    assert!(dup < other);
}

#[test]
fn two_runs_are_byte_identical() {
    let make_index = || {
        MockIndex(vec![
            MockPackage::installed(10050, "com.example"),
            MockPackage::removed(10002, "com.gone"),
        ])
    };
    let first = emit_document(&make_index());
    let second = emit_document(&make_index());
    assert_eq!(first, second);
}

#[test]
fn document_is_two_space_indented() {
    let text = emit_document(&MockIndex(vec![MockPackage::installed(1, "com.one")]));
    assert!(text.starts_with("{\n  \"device\": {\n    \"arch\""));
    assert!(text.ends_with("}"));
}
