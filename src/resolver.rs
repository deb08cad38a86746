//! Resolving canonical paths to file contents.
//!
//! The traversal in [`crate::discover`] only ever talks to the [`Resolver`]
//! trait, so tests can substitute an in-memory implementation and the
//! filesystem layout stays a boundary concern. Resolution must be
//! deterministic and side-effect free; the traversal relies on that to cache
//! each file exactly once per flatten call.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::FlattenError;
use crate::path;

/// A successfully resolved file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolved {
    /// The canonical (root-relative, forward-slash) path of the file.
    pub canonical_path: String,
    /// The file's raw text content.
    pub content: String,
}

/// Maps a canonical specifier to file content.
pub trait Resolver {
    /// Resolve `specifier` to a file.
    ///
    /// # Errors
    ///
    /// [`FlattenError::ResolutionFailed`] if no file exists for the
    /// specifier. There is exactly one failure mode — no fallback chains.
    fn resolve(&self, specifier: &str) -> Result<Resolved, FlattenError>;
}

// ---------------------------------------------------------------------------
// FsResolver
// ---------------------------------------------------------------------------

/// Filesystem resolver rooted at a project directory.
///
/// A specifier resolves to `<root>/<specifier>`; a bare (package-style)
/// specifier that does not exist there falls back to
/// `<root>/node_modules/<specifier>`. A `..`-prefixed specifier — an import
/// chain that escapes the project root — is rejected outright.
#[derive(Debug)]
pub struct FsResolver {
    root: PathBuf,
}

impl FsResolver {
    /// Create a resolver for the project rooted at `root`.
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_owned(),
        }
    }

    fn candidates(&self, specifier: &str) -> [PathBuf; 2] {
        // Relative specifiers were already normalized to root-relative
        // canonical paths before reaching the resolver, so anything not
        // found directly must be a package import.
        [
            self.root.join(specifier),
            self.root.join("node_modules").join(specifier),
        ]
    }
}

impl Resolver for FsResolver {
    fn resolve(&self, specifier: &str) -> Result<Resolved, FlattenError> {
        // An import chain that collapses to a `..`-prefixed path escapes the
        // project root; resolving it would hand out files outside the
        // project under an unstable node identity.
        if specifier == ".." || specifier.starts_with("../") {
            return Err(FlattenError::ResolutionFailed {
                specifier: specifier.to_owned(),
                detail: format!(
                    "import escapes the project root '{}'",
                    self.root.display()
                ),
            });
        }
        let candidates = self.candidates(specifier);
        for candidate in &candidates {
            if candidate.is_file() {
                let content = fs::read_to_string(candidate).map_err(|err| {
                    FlattenError::ResolutionFailed {
                        specifier: specifier.to_owned(),
                        detail: format!("could not read '{}': {err}", candidate.display()),
                    }
                })?;
                return Ok(Resolved {
                    canonical_path: path::forward_slashes(specifier),
                    content,
                });
            }
        }
        let tried: Vec<String> = candidates
            .iter()
            .map(|c| format!("'{}'", c.display()))
            .collect();
        Err(FlattenError::ResolutionFailed {
            specifier: specifier.to_owned(),
            detail: format!("file not found (tried {})", tried.join(", ")),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
