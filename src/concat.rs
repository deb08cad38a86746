//! Concatenation of sorted sources into the flattened output.
//!
//! The byte format is fixed so flattened output is diffable between runs:
//!
//! ```text
//! pragma solidity <unified>;        (only if any file declared one)
//!
//! // File: <canonical path>
//!
//! <cleaned body>
//!
//! // File: <next canonical path>
//! ...
//! ```
//!
//! Cleaning removes every pragma and import line (whole lines, matched
//! line-anchored) and trims leading/trailing blank lines; each section ends
//! with exactly one newline, and exactly one blank line separates sections.
//! A blank line a stripped import leaves behind *between* surviving lines is
//! kept as ordinary interior whitespace.
//!
//! The engine writes to a caller-supplied [`io::Write`] and never opens
//! files itself.

use std::collections::HashMap;
use std::io::{self, Write};

use crate::discover::SourceUnit;
use crate::imports;

/// Write the flattened text for `order` to `out`.
///
/// `order` must be the topologically sorted canonical paths and `sources`
/// must contain a [`SourceUnit`] for each of them. `unified_pragma` is the
/// reconciled declaration, if any.
///
/// # Panics
///
/// Panics if `order` names a path missing from `sources`; discovery and
/// sorting operate on the same node set, so this cannot happen in the
/// pipeline.
pub fn write_flattened<W: Write>(
    out: &mut W,
    order: &[String],
    sources: &HashMap<String, SourceUnit>,
    unified_pragma: Option<&str>,
) -> io::Result<()> {
    if let Some(version) = unified_pragma {
        writeln!(out, "pragma solidity {version};")?;
    }
    for path in order {
        let unit = sources
            .get(path)
            .unwrap_or_else(|| panic!("no source for sorted path '{path}'"));
        let body = clean_body(&unit.content);
        if body.is_empty() {
            // Directive-only file: bare marker, so the next section's own
            // leading newline still yields exactly one blank line.
            writeln!(out, "\n// File: {path}")?;
        } else {
            writeln!(out, "\n// File: {path}\n")?;
            writeln!(out, "{body}")?;
        }
    }
    Ok(())
}

/// Strip directive lines and trim surrounding blank lines from a file body.
fn clean_body(content: &str) -> String {
    let kept: Vec<&str> = content
        .lines()
        .filter(|line| !imports::is_pragma_line(line) && !imports::is_import_line(line))
        .collect();

    let start = kept
        .iter()
        .position(|line| !line.trim().is_empty())
        .unwrap_or(kept.len());
    let end = kept
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(start, |idx| idx + 1);

    kept[start..end].join("\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
