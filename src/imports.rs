//! Import-directive and pragma extraction.
//!
//! The flattener only understands two pieces of Solidity grammar: `import`
//! directives and the file-scope `pragma solidity ...;` declaration. Both are
//! matched line-anchored, mirroring how they appear in practice; everything
//! else in a file is opaque text.
//!
//! Supported import forms:
//!
//! ```text
//! import "./parent.sol";
//! import './parent.sol' as p;
//! import * as roles from "openzeppelin-solidity/contracts/access/Roles.sol";
//! import {Roles, PauserRole} from "./roles.sol";
//! ```

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Matches a whole line that starts an import directive.
static IMPORT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*import\s+.*$").expect("static regex"));

/// Captures the specifier out of a single-line import directive.
static IMPORT_SPECIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*import\s+(?:[^"']*?\bfrom\s+)?["']([^"']+)["']"#).expect("static regex")
});

/// Matches a whole `pragma solidity` line, capturing the declaration text.
static PRAGMA_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*pragma\s+solidity\s+(.*?)\s*;").expect("static regex"));

// ---------------------------------------------------------------------------
// Import extraction
// ---------------------------------------------------------------------------

/// A line that starts an import directive but carries no recognizable
/// specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportParseError {
    /// 1-based line number of the offending directive.
    pub line: usize,
}

impl fmt::Display for ImportParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unparseable import directive on line {}", self.line)
    }
}

impl std::error::Error for ImportParseError {}

/// Extract the raw import specifiers of a file, in source order.
///
/// Returns an error for any line that begins an import directive but yields
/// no specifier — a fatal condition for the whole flatten operation.
pub fn extract_imports(content: &str) -> Result<Vec<String>, ImportParseError> {
    let mut specifiers = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if !IMPORT_LINE.is_match(line) {
            continue;
        }
        match IMPORT_SPECIFIER.captures(line) {
            Some(caps) => specifiers.push(caps[1].to_owned()),
            None => return Err(ImportParseError { line: idx + 1 }),
        }
    }
    Ok(specifiers)
}

/// Whether a line is an import directive (used when stripping bodies).
pub fn is_import_line(line: &str) -> bool {
    IMPORT_LINE.is_match(line)
}

// ---------------------------------------------------------------------------
// Pragma extraction
// ---------------------------------------------------------------------------

/// The declaration text of the file's first `pragma solidity` line, if any.
///
/// A file with multiple pragma declarations uses the first one; the rest are
/// still stripped from output.
pub fn pragma_declaration(content: &str) -> Option<&str> {
    content
        .lines()
        .find_map(|line| PRAGMA_LINE.captures(line))
        .map(|caps| caps.get(1).map_or("", |m| m.as_str()))
        .map(str::trim)
        .filter(|decl| !decl.is_empty())
}

/// Whether a line is a `pragma solidity` declaration (used when stripping
/// bodies).
pub fn is_pragma_line(line: &str) -> bool {
    PRAGMA_LINE.is_match(line)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
