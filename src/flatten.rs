//! One flatten operation, end to end.
//!
//! Pipeline: canonicalize entries → discover the dependency closure →
//! topological sort → reconcile version declarations → concatenate. Every
//! fallible stage completes before the first output byte is written, so a
//! failed run never emits partial output.
//!
//! All state (graph, visited set, source map) is owned by the call and
//! dropped at its end; concurrent flatten invocations share nothing.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::concat;
use crate::discover::{self, SourceUnit};
use crate::error::FlattenError;
use crate::project;
use crate::resolver::{FsResolver, Resolver};
use crate::version::{self, Declaration};

/// Flatten `entries` (paths relative to `cwd`) into `out`.
///
/// The project root is discovered at or above `cwd`; entry paths are made
/// root-relative before traversal. Output is written only after discovery,
/// sorting, and version reconciliation have all succeeded.
///
/// # Errors
///
/// Any of the fatal conditions in [`FlattenError`]; the operation never
/// retries and never produces partial output.
pub fn flatten_to_writer<W: Write>(
    entries: &[&Path],
    cwd: &Path,
    out: &mut W,
) -> Result<(), FlattenError> {
    let root = project::find_project_root(cwd)?;
    debug!(root = %root.display(), "project root discovered");

    let canonical_entries = entries
        .iter()
        .map(|entry| project::entry_to_canonical(entry, cwd, &root))
        .collect::<Result<Vec<_>, _>>()?;

    let resolver = FsResolver::new(&root);
    flatten_canonical(&canonical_entries, &resolver, out)
}

/// Flatten already-canonical entries through an arbitrary [`Resolver`].
///
/// This is the core pipeline; [`flatten_to_writer`] wraps it with project
/// root discovery and the filesystem resolver.
pub fn flatten_canonical<W: Write>(
    entries: &[String],
    resolver: &dyn Resolver,
    out: &mut W,
) -> Result<(), FlattenError> {
    let discovery = discover::discover(entries, resolver)?;
    let order = discovery.graph.toposort()?;
    debug!(files = order.len(), "topological order computed");

    let unified = reconcile_pragmas(&order, &discovery.sources)?;
    concat::write_flattened(out, &order, &discovery.sources, unified.as_deref())?;
    Ok(())
}

/// Flatten to an in-memory string; the whole text or nothing.
pub fn flatten_to_string(entries: &[&Path], cwd: &Path) -> Result<String, FlattenError> {
    let mut buf = Vec::new();
    flatten_to_writer(entries, cwd, &mut buf)?;
    String::from_utf8(buf).map_err(|err| {
        FlattenError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err))
    })
}

fn reconcile_pragmas(
    order: &[String],
    sources: &HashMap<String, SourceUnit>,
) -> Result<Option<String>, FlattenError> {
    let declarations = order
        .iter()
        .filter_map(|path| {
            sources
                .get(path)
                .and_then(|unit| unit.pragma.as_deref())
                .map(|raw| Declaration::parse(path, raw))
        })
        .collect::<Result<Vec<_>, _>>()?;
    version::reconcile(declarations)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
