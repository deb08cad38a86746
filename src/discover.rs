//! Dependency discovery: depth-first traversal from the entry points.
//!
//! Walks every entry sequentially, resolving files through the caller's
//! [`Resolver`], extracting import specifiers, normalizing them to canonical
//! paths, and recording one `(dependency, dependent)` edge per import
//! occurrence. A shared visited set keeps a file reachable from two entries
//! from being resolved twice; cycle detection is *not* this module's job —
//! the sorter rejects cyclic graphs.
//!
//! The walk uses an explicit stack rather than recursion so pathological
//! import depth cannot exhaust the call stack. Children are pushed in
//! reverse source order, which preserves the preorder a recursive walk would
//! produce and keeps diagnostic ordering deterministic.

use std::collections::HashMap;

use tracing::debug;

use crate::error::FlattenError;
use crate::graph::DependencyGraph;
use crate::imports;
use crate::path;
use crate::resolver::Resolver;

// ---------------------------------------------------------------------------
// SourceUnit
// ---------------------------------------------------------------------------

/// The resolved representation of one file.
///
/// Created on first resolution, immutable afterwards, and discarded when the
/// flatten call ends.
#[derive(Clone, Debug)]
pub struct SourceUnit {
    /// Canonical path (graph node identity and output label).
    pub path: String,
    /// Raw file content.
    pub content: String,
    /// Canonical paths of the file's imports, in source order.
    pub imports: Vec<String>,
    /// The file's version declaration text, if it has one.
    pub pragma: Option<String>,
}

/// Result of dependency discovery: the edge set plus every resolved file.
#[derive(Debug)]
pub struct Discovery {
    /// The dependency graph, nodes in discovery order.
    pub graph: DependencyGraph,
    /// Canonical path → resolved source, for every discovered file.
    pub sources: HashMap<String, SourceUnit>,
}

// ---------------------------------------------------------------------------
// Traversal
// ---------------------------------------------------------------------------

/// Discover the full transitive dependency closure of `entries`.
///
/// Entries are processed sequentially in caller order; within one entry the
/// walk is depth-first in source order. Every visited file becomes a graph
/// node even if it imports nothing.
///
/// # Errors
///
/// Propagates [`FlattenError::ResolutionFailed`] from the resolver and maps
/// import-extraction failures to [`FlattenError::ParseFailure`] naming the
/// offending canonical path. Both abort the whole operation.
pub fn discover(entries: &[String], resolver: &dyn Resolver) -> Result<Discovery, FlattenError> {
    let mut graph = DependencyGraph::new();
    let mut sources: HashMap<String, SourceUnit> = HashMap::new();
    let mut edges: Vec<(String, String)> = Vec::new();

    for entry in entries {
        let mut stack: Vec<String> = vec![entry.clone()];
        while let Some(current) = stack.pop() {
            if sources.contains_key(&current) {
                continue;
            }
            let unit = resolve_unit(&current, resolver)?;
            debug!(path = %unit.path, imports = unit.imports.len(), "discovered source");

            // Nodes register in visit order. Edges are buffered until the
            // walk is done: add_edge would create missing endpoints early,
            // turning discovery order into first-reference order and
            // reordering cycle diagnostics.
            graph.add_node(&unit.path);
            for dependency in &unit.imports {
                edges.push((dependency.clone(), unit.path.clone()));
            }
            // Reverse push: first import comes off the stack first.
            for dependency in unit.imports.iter().rev() {
                if !sources.contains_key(dependency) {
                    stack.push(dependency.clone());
                }
            }
            sources.insert(unit.path.clone(), unit);
        }
    }

    for (dependency, dependent) in &edges {
        graph.add_edge(dependency, dependent);
    }

    Ok(Discovery { graph, sources })
}

fn resolve_unit(canonical: &str, resolver: &dyn Resolver) -> Result<SourceUnit, FlattenError> {
    let resolved = resolver.resolve(canonical)?;
    let raw_imports = imports::extract_imports(&resolved.content).map_err(|err| {
        debug!(path = %resolved.canonical_path, %err, "import extraction failed");
        FlattenError::ParseFailure {
            path: resolved.canonical_path.clone(),
        }
    })?;
    let imports = raw_imports
        .iter()
        .map(|spec| path::normalize_specifier(&resolved.canonical_path, spec))
        .collect();
    let pragma = imports::pragma_declaration(&resolved.content).map(str::to_owned);
    Ok(SourceUnit {
        path: resolved.canonical_path,
        content: resolved.content,
        imports,
        pragma,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::resolver::Resolved;

    /// In-memory resolver keyed by canonical path.
    struct MapResolver {
        files: HashMap<String, String>,
    }

    impl MapResolver {
        fn new(files: &[(&str, &str)]) -> Self {
            Self {
                files: files
                    .iter()
                    .map(|(p, c)| ((*p).to_owned(), (*c).to_owned()))
                    .collect(),
            }
        }
    }

    impl Resolver for MapResolver {
        fn resolve(&self, specifier: &str) -> Result<Resolved, FlattenError> {
            self.files
                .get(specifier)
                .map(|content| Resolved {
                    canonical_path: specifier.to_owned(),
                    content: content.clone(),
                })
                .ok_or_else(|| FlattenError::ResolutionFailed {
                    specifier: specifier.to_owned(),
                    detail: "file not found".to_owned(),
                })
        }
    }

    fn entries(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| (*p).to_owned()).collect()
    }

    #[test]
    fn walks_transitive_dependencies() {
        let resolver = MapResolver::new(&[
            ("contracts/child.sol", "import \"./parent.sol\";\ncontract Child {}\n"),
            ("contracts/parent.sol", "import \"./roles.sol\";\ncontract Parent {}\n"),
            ("contracts/roles.sol", "library Roles {}\n"),
        ]);
        let discovery = discover(&entries(&["contracts/child.sol"]), &resolver).unwrap();
        assert_eq!(discovery.sources.len(), 3);
        assert!(discovery.sources.contains_key("contracts/roles.sol"));
    }

    #[test]
    fn discovery_order_is_preorder() {
        let resolver = MapResolver::new(&[
            ("a.sol", "import \"./b.sol\";\nimport \"./c.sol\";\n"),
            ("b.sol", "import \"./d.sol\";\n"),
            ("c.sol", "contract C {}\n"),
            ("d.sol", "contract D {}\n"),
        ]);
        let discovery = discover(&entries(&["a.sol"]), &resolver).unwrap();
        let order: Vec<&str> = discovery.graph.nodes().collect();
        assert_eq!(order, vec!["a.sol", "b.sol", "d.sol", "c.sol"]);
    }

    #[test]
    fn file_without_imports_still_becomes_a_node() {
        let resolver = MapResolver::new(&[("solo.sol", "contract Solo {}\n")]);
        let discovery = discover(&entries(&["solo.sol"]), &resolver).unwrap();
        assert_eq!(discovery.graph.len(), 1);
        assert_eq!(discovery.graph.toposort().unwrap(), vec!["solo.sol"]);
    }

    #[test]
    fn shared_dependency_resolved_once_across_entries() {
        let resolver = MapResolver::new(&[
            ("x.sol", "import \"./shared.sol\";\n"),
            ("y.sol", "import \"./shared.sol\";\n"),
            ("shared.sol", "contract Shared {}\n"),
        ]);
        let discovery = discover(&entries(&["x.sol", "y.sol"]), &resolver).unwrap();
        // Both edges recorded, shared resolved once.
        assert_eq!(discovery.sources.len(), 3);
        let order = discovery.graph.toposort().unwrap();
        let pos = |p: &str| order.iter().position(|o| o == p).unwrap();
        assert!(pos("shared.sol") < pos("x.sol"));
        assert!(pos("shared.sol") < pos("y.sol"));
    }

    #[test]
    fn duplicate_entries_are_deduplicated() {
        let resolver = MapResolver::new(&[("a.sol", "contract A {}\n")]);
        let discovery = discover(&entries(&["a.sol", "a.sol"]), &resolver).unwrap();
        assert_eq!(discovery.graph.len(), 1);
        assert_eq!(discovery.sources.len(), 1);
    }

    #[test]
    fn cyclic_imports_discover_fine_but_fail_to_sort() {
        let resolver = MapResolver::new(&[
            ("cycle1.sol", "import \"./cycle2.sol\";\n"),
            ("cycle2.sol", "import \"./cycle1.sol\";\n"),
        ]);
        let discovery = discover(&entries(&["cycle1.sol"]), &resolver).unwrap();
        let err = discovery.graph.toposort().unwrap_err();
        match err {
            FlattenError::CycleDetected { files } => {
                assert_eq!(files, vec!["cycle1.sol", "cycle2.sol"]);
            }
            other => panic!("expected CycleDetected, got {other:?}"),
        }
    }

    #[test]
    fn cycle_diagnostic_lists_files_in_visit_order() {
        // a references b and c up front, but the walk descends into b (and
        // d below it) before ever visiting c, so the diagnostic must read
        // a, b, d, c — not the first-reference order a, b, c, d.
        let resolver = MapResolver::new(&[
            ("a.sol", "import \"./b.sol\";\nimport \"./c.sol\";\n"),
            ("b.sol", "import \"./d.sol\";\n"),
            ("c.sol", "contract C {}\n"),
            ("d.sol", "import \"./a.sol\";\n"),
        ]);
        let discovery = discover(&entries(&["a.sol"]), &resolver).unwrap();
        let err = discovery.graph.toposort().unwrap_err();
        match err {
            FlattenError::CycleDetected { files } => {
                assert_eq!(files, vec!["a.sol", "b.sol", "d.sol", "c.sol"]);
            }
            other => panic!("expected CycleDetected, got {other:?}"),
        }
    }

    #[test]
    fn missing_import_propagates_resolution_failure() {
        let resolver = MapResolver::new(&[("a.sol", "import \"./ghost.sol\";\n")]);
        let err = discover(&entries(&["a.sol"]), &resolver).unwrap_err();
        match err {
            FlattenError::ResolutionFailed { specifier, .. } => {
                assert_eq!(specifier, "ghost.sol");
            }
            other => panic!("expected ResolutionFailed, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_import_names_the_file() {
        let resolver = MapResolver::new(&[("bad.sol", "import not-a-string;\n")]);
        let err = discover(&entries(&["bad.sol"]), &resolver).unwrap_err();
        match err {
            FlattenError::ParseFailure { path } => assert_eq!(path, "bad.sol"),
            other => panic!("expected ParseFailure, got {other:?}"),
        }
    }

    #[test]
    fn pragma_is_captured_on_the_source_unit() {
        let resolver = MapResolver::new(&[(
            "a.sol",
            "pragma solidity ^0.5.0;\ncontract A {}\n",
        )]);
        let discovery = discover(&entries(&["a.sol"]), &resolver).unwrap();
        assert_eq!(
            discovery.sources["a.sol"].pragma.as_deref(),
            Some("^0.5.0")
        );
    }
}
