//! Error types for the flattener.
//!
//! Defines [`FlattenError`], the unified error type for one flatten operation.
//! Every variant is fatal: the whole run aborts and no partial output is
//! emitted. Messages are designed to be self-contained — each one names the
//! offending file(s) and, where possible, says how to fix the problem.

use std::fmt;
use std::path::PathBuf;

use crate::project::CONFIG_FILENAMES;

// ---------------------------------------------------------------------------
// FlattenError
// ---------------------------------------------------------------------------

/// Unified error type for flatten operations.
///
/// Each variant carries enough context that the CLI can print it verbatim
/// and exit; no variant is recoverable.
#[derive(Debug)]
pub enum FlattenError {
    /// A file's import directives could not be extracted.
    ParseFailure {
        /// Canonical path of the file that failed to parse.
        path: String,
    },

    /// An import specifier could not be resolved to a file.
    ResolutionFailed {
        /// The specifier as it appeared (after normalization).
        specifier: String,
        /// What went wrong, including the locations tried.
        detail: String,
    },

    /// The dependency graph has no valid topological order.
    CycleDetected {
        /// All files discovered during traversal, in discovery order.
        files: Vec<String>,
    },

    /// Two files declare incompatible compiler versions.
    VersionConflict {
        /// First offending file and its declaration.
        file_a: String,
        value_a: String,
        /// Second offending file and its declaration.
        file_b: String,
        value_b: String,
    },

    /// A version declaration does not match the supported grammar.
    MalformedVersion {
        /// Canonical path of the declaring file.
        path: String,
        /// The offending declaration text.
        declaration: String,
    },

    /// No project root could be discovered.
    ConfigurationMissing {
        /// The directory the upward search started from.
        searched_from: PathBuf,
    },

    /// The caller-supplied output location cannot be used.
    InvalidOutputTarget {
        /// The requested output path.
        path: PathBuf,
        /// Why it cannot be used.
        detail: String,
    },

    /// An I/O error occurred while reading a source or writing output.
    Io(std::io::Error),
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for FlattenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParseFailure { path } => {
                write!(
                    f,
                    "could not parse '{path}' for extracting its imports.\n  To fix: check the file's import directives for syntax errors."
                )
            }
            Self::ResolutionFailed { specifier, detail } => {
                write!(
                    f,
                    "could not resolve import '{specifier}': {detail}\n  To fix: check that the file exists and the import path is spelled correctly."
                )
            }
            Self::CycleDetected { files } => {
                write!(
                    f,
                    "there is a cycle in the dependency graph, can't compute topological ordering. Files:"
                )?;
                for file in files {
                    write!(f, "\n\t{file}")?;
                }
                Ok(())
            }
            Self::VersionConflict {
                file_a,
                value_a,
                file_b,
                value_b,
            } => {
                write!(
                    f,
                    "incompatible compiler version declarations: '{file_a}' declares {value_a} but '{file_b}' declares {value_b}.\n  To fix: align the pragma solidity declarations of both files."
                )
            }
            Self::MalformedVersion { path, declaration } => {
                write!(
                    f,
                    "unsupported compiler version declaration in '{path}': {declaration}. Only pinned or ^ versions are supported."
                )
            }
            Self::ConfigurationMissing { searched_from } => {
                write!(
                    f,
                    "not inside a Truffle project: {} not found (searched upward from '{}').\n  To fix: run from within a project, or create one of those config files at its root.",
                    CONFIG_FILENAMES.join(" or "),
                    searched_from.display(),
                )
            }
            Self::InvalidOutputTarget { path, detail } => {
                write!(
                    f,
                    "invalid output target '{}': {detail}\n  To fix: choose a writable output path.",
                    path.display(),
                )
            }
            Self::Io(err) => {
                write!(
                    f,
                    "I/O error: {err}\n  To fix: check file permissions and disk space."
                )
            }
        }
    }
}

// ---------------------------------------------------------------------------
// std::error::Error
// ---------------------------------------------------------------------------

impl std::error::Error for FlattenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FlattenError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
