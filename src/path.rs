//! Canonical path handling.
//!
//! Every file in a flatten operation is identified by a *canonical path*: a
//! normalized, forward-slash-separated, project-root-relative string. Two
//! import specifiers that reach the same file must normalize to the same
//! canonical path — it is the sole node identity in the dependency graph and
//! the dedup key for output.

/// Replace platform separators with forward slashes.
pub fn forward_slashes(path: &str) -> String {
    path.replace('\\', "/")
}

/// The directory portion of a canonical path (empty for a bare filename).
pub fn dir_of(canonical: &str) -> &str {
    match canonical.rfind('/') {
        Some(idx) => &canonical[..idx],
        None => "",
    }
}

/// Whether a raw import specifier is relative to the importing file.
pub fn is_relative(specifier: &str) -> bool {
    specifier.starts_with("./") || specifier.starts_with("../")
}

/// Normalize a raw import specifier against the importing file's canonical
/// path.
///
/// Relative specifiers (`./`, `../`) are joined against the importer's
/// directory and `.`/`..` segments are collapsed. Bare (package-style)
/// specifiers pass through unchanged apart from separator normalization.
/// Pure: no filesystem access.
pub fn normalize_specifier(importer: &str, specifier: &str) -> String {
    let specifier = forward_slashes(specifier);
    if !is_relative(&specifier) {
        return specifier;
    }
    let joined = format!("{}/{}", dir_of(importer), specifier);
    collapse_dots(&joined)
}

/// Collapse `.` and `..` segments of a forward-slash path.
///
/// Leading `..` segments that escape the root are kept, so callers can detect
/// paths that leave the project root.
pub fn collapse_dots(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if matches!(segments.last(), Some(&"..") | None) {
                    segments.push("..");
                } else {
                    segments.pop();
                }
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- forward_slashes / dir_of --

    #[test]
    fn forward_slashes_converts_backslashes() {
        assert_eq!(forward_slashes("a\\b\\c.sol"), "a/b/c.sol");
    }

    #[test]
    fn dir_of_nested_path() {
        assert_eq!(dir_of("contracts/access/Roles.sol"), "contracts/access");
    }

    #[test]
    fn dir_of_bare_filename_is_empty() {
        assert_eq!(dir_of("Roles.sol"), "");
    }

    // -- normalize_specifier --

    #[test]
    fn sibling_import() {
        assert_eq!(
            normalize_specifier("contracts/child.sol", "./parent.sol"),
            "contracts/parent.sol"
        );
    }

    #[test]
    fn parent_directory_import() {
        assert_eq!(
            normalize_specifier("contracts/access/Roles.sol", "../util/Math.sol"),
            "contracts/util/Math.sol"
        );
    }

    #[test]
    fn bare_specifier_passes_through() {
        assert_eq!(
            normalize_specifier(
                "contracts/child.sol",
                "openzeppelin-solidity/contracts/access/Roles.sol"
            ),
            "openzeppelin-solidity/contracts/access/Roles.sol"
        );
    }

    #[test]
    fn same_file_via_two_specifiers_yields_same_canonical_path() {
        let a = normalize_specifier("contracts/a/x.sol", "../parent.sol");
        let b = normalize_specifier("contracts/child.sol", "./parent.sol");
        assert_eq!(a, b);
        assert_eq!(a, "contracts/parent.sol");
    }

    #[test]
    fn backslash_specifier_is_normalized() {
        assert_eq!(
            normalize_specifier("contracts/child.sol", ".\\parent.sol"),
            "contracts/parent.sol"
        );
    }

    // -- collapse_dots --

    #[test]
    fn collapse_current_dir_segments() {
        assert_eq!(collapse_dots("a/./b/./c.sol"), "a/b/c.sol");
    }

    #[test]
    fn collapse_parent_dir_segments() {
        assert_eq!(collapse_dots("a/b/../c.sol"), "a/c.sol");
    }

    #[test]
    fn leading_parent_segments_are_kept() {
        assert_eq!(collapse_dots("../outside.sol"), "../outside.sol");
        assert_eq!(collapse_dots("a/../../outside.sol"), "../outside.sol");
    }

    #[test]
    fn empty_segments_from_double_slash_are_dropped() {
        assert_eq!(collapse_dots("a//b/c.sol"), "a/b/c.sol");
    }
}
