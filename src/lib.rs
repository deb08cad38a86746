//! solflat library crate — re-exports for integration tests and embedders.
//!
//! The primary interface is the `solflat` binary. This lib.rs exposes the
//! pipeline modules so integration tests (and library callers) can drive a
//! flatten operation directly without going through the CLI.

pub mod concat;
pub mod discover;
pub mod error;
pub mod flatten;
pub mod graph;
pub mod imports;
pub mod path;
pub mod project;
pub mod resolver;
pub mod version;

// Private module only used by the binary — not re-exported: telemetry.
