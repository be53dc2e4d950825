//! Signer certificate digest.
//!
//! Packages carry a list of signing certificates (raw DER bytes). The
//! inventory records a single lowercase-hex SHA-256 digest of the FIRST
//! certificate only; any later certificates in a multi-signer package are
//! ignored. This is a documented limitation of the format, not something
//! to silently fix here.
//!
//! The empty string is a meaningful output: it distinguishes "signing info
//! was available but held no certificates" from the `null` the collector
//! writes when signing info could not be obtained at all.

use sha2::{Digest, Sha256};

/// Digest a package's signing-certificate list.
///
/// Returns `""` when the list is absent or empty, otherwise the
/// lowercase-hex SHA-256 of the first certificate.
pub fn signer_digest(certs: Option<&[Vec<u8>]>) -> String {
    let Some(certs) = certs else {
        return String::new();
    };
    let Some(first) = certs.first() else {
        return String::new();
    };
    hex::encode(Sha256::digest(first))
}
