//! applist core library.
//!
//! The pipeline behind the `applist` binary:
//! - Tagged-variant value walker over collaborator-described schemas
//! - App and device metadata collectors
//! - Streaming JSON emitter with fixed formatting rules
//! - Run orchestration and exit codes
//!
//! The binary entry point is in `main.rs`.

pub mod collect;
pub mod config;
pub mod emit;
pub mod exit_codes;
pub mod index;
pub mod logging;
pub mod platform;
pub mod run;
pub mod walk;
