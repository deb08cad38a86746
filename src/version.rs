//! Compiler-version declarations and their reconciliation.
//!
//! The supported declaration grammar is deliberately narrow: an optional `^`
//! followed by two or three dot-separated numeric components (`0.4.24`,
//! `^0.5.0`, `^0.5`, `1.2`). Range declarations (`>=0.4.24 <0.6.0`) and
//! anything else are rejected as malformed.
//!
//! Reconciliation produces at most one declaration for the flattened output:
//! - at most one distinct *pinned* value may appear across all files;
//! - among *caret* declarations, the highest base version wins;
//! - a pinned value must satisfy the surviving caret range (caret semantics
//!   as in node-semver: `^1.2.3` ⇒ `>=1.2.3 <2.0.0`, `^0.2.3` ⇒
//!   `>=0.2.3 <0.3.0`, `^0.0.3` ⇒ `>=0.0.3 <0.0.4`).

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::FlattenError;

/// Grammar of a supported declaration: optional caret, 2-3 numeric components.
static SUPPORTED_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\^?\d+(\.\d+){1,2}$").expect("static regex"));

// ---------------------------------------------------------------------------
// Version
// ---------------------------------------------------------------------------

/// A parsed version number. Missing components parse as zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Whether `self` satisfies the caret range based at `caret`.
    #[must_use]
    pub fn satisfies_caret(self, caret: Self) -> bool {
        if self < caret {
            return false;
        }
        // Upper bound: first non-zero component may not change.
        if caret.major > 0 {
            self.major == caret.major
        } else if caret.minor > 0 {
            self.major == 0 && self.minor == caret.minor
        } else {
            self.major == 0 && self.minor == 0 && self.patch == caret.patch
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

// ---------------------------------------------------------------------------
// Declaration
// ---------------------------------------------------------------------------

/// One file's version declaration: the raw text plus its parsed form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// Canonical path of the declaring file.
    pub file: String,
    /// The declaration exactly as written (`^0.5.0`, `0.4.24`, ...).
    pub raw: String,
    /// Parsed base version.
    pub version: Version,
    /// Whether the declaration is a caret (minimum-compatible) range.
    pub caret: bool,
}

impl Declaration {
    /// Parse a declaration for `file`, rejecting anything outside the
    /// supported grammar.
    pub fn parse(file: &str, raw: &str) -> Result<Self, FlattenError> {
        if !SUPPORTED_DECLARATION.is_match(raw) {
            return Err(FlattenError::MalformedVersion {
                path: file.to_owned(),
                declaration: raw.to_owned(),
            });
        }
        let caret = raw.starts_with('^');
        let digits = raw.strip_prefix('^').unwrap_or(raw);
        let mut components = digits.split('.').map(|c| c.parse::<u64>().unwrap_or(0));
        let version = Version {
            major: components.next().unwrap_or(0),
            minor: components.next().unwrap_or(0),
            patch: components.next().unwrap_or(0),
        };
        Ok(Self {
            file: file.to_owned(),
            raw: raw.to_owned(),
            version,
            caret,
        })
    }
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

/// Fold the declarations of all files (in sorted output order) into at most
/// one unified declaration.
///
/// Returns the raw text to emit: the pinned value if any file pins, else the
/// highest caret value, else `None`. Conflicts are checked as soon as both
/// sides are known, so the error names the earliest offending pair.
pub fn reconcile<I>(declarations: I) -> Result<Option<String>, FlattenError>
where
    I: IntoIterator<Item = Declaration>,
{
    let mut pinned: Option<Declaration> = None;
    let mut max_caret: Option<Declaration> = None;

    for decl in declarations {
        if decl.caret {
            let replace = max_caret
                .as_ref()
                .is_none_or(|current| decl.version > current.version);
            if replace {
                max_caret = Some(decl);
            }
        } else if let Some(existing) = &pinned {
            if existing.raw != decl.raw {
                return Err(FlattenError::VersionConflict {
                    file_a: existing.file.clone(),
                    value_a: existing.raw.clone(),
                    file_b: decl.file,
                    value_b: decl.raw,
                });
            }
        } else {
            pinned = Some(decl);
        }

        if let (Some(pin), Some(caret)) = (&pinned, &max_caret)
            && !pin.version.satisfies_caret(caret.version)
        {
            return Err(FlattenError::VersionConflict {
                file_a: caret.file.clone(),
                value_a: caret.raw.clone(),
                file_b: pin.file.clone(),
                value_b: pin.raw.clone(),
            });
        }
    }

    Ok(pinned.or(max_caret).map(|decl| decl.raw))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
