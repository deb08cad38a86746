//! Project-root discovery and entry-path canonicalization.
//!
//! A flatten operation is anchored at a Truffle project root, identified by
//! the presence of a config file. All canonical paths are relative to that
//! root, so output labels and graph identity are stable no matter where the
//! tool is invoked from.

use std::path::{Path, PathBuf};

use crate::error::FlattenError;
use crate::path;

/// Config filenames that identify a project root, in probe order.
pub const CONFIG_FILENAMES: [&str; 2] = ["truffle.js", "truffle-config.js"];

/// Find the project root at or above `start`.
///
/// # Errors
///
/// [`FlattenError::ConfigurationMissing`] if no ancestor of `start` contains
/// one of [`CONFIG_FILENAMES`].
pub fn find_project_root(start: &Path) -> Result<PathBuf, FlattenError> {
    for dir in start.ancestors() {
        for name in CONFIG_FILENAMES {
            if dir.join(name).is_file() {
                return Ok(dir.to_owned());
            }
        }
    }
    Err(FlattenError::ConfigurationMissing {
        searched_from: start.to_owned(),
    })
}

/// Convert an entry path (as given on the command line, relative to `cwd`)
/// into a canonical root-relative path.
///
/// # Errors
///
/// [`FlattenError::ResolutionFailed`] if the entry does not live under the
/// project root — a `../`-style canonical path would break node identity.
pub fn entry_to_canonical(
    entry: &Path,
    cwd: &Path,
    root: &Path,
) -> Result<String, FlattenError> {
    let absolute = if entry.is_absolute() {
        entry.to_owned()
    } else {
        cwd.join(entry)
    };
    let collapsed = path::collapse_dots(&path::forward_slashes(&absolute.to_string_lossy()));
    let root_str = path::collapse_dots(&path::forward_slashes(&root.to_string_lossy()));

    collapsed
        .strip_prefix(&format!("{root_str}/"))
        .map(str::to_owned)
        .ok_or_else(|| FlattenError::ResolutionFailed {
            specifier: entry.display().to_string(),
            detail: format!("entry is outside the project root '{}'", root.display()),
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
