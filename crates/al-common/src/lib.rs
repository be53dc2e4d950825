//! applist common types.
//!
//! This crate provides the foundational pieces shared across al-core modules:
//! - The structural value model used between the walker and the emitter
//! - The signer certificate digest
//! - Common error types
//!
//! It performs no I/O of its own.

pub mod digest;
pub mod error;
pub mod value;

pub use digest::signer_digest;
pub use error::{Error, ErrorCategory, Result};
pub use value::{Number, Record, Value};
