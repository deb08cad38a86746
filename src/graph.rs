//! Dependency graph and topological ordering.
//!
//! Nodes are canonical paths, stored in discovery order; edges mean
//! "dependency must be emitted before dependent". The graph is owned by a
//! single flatten invocation and never shared, so there is no locking and no
//! cross-invocation state.
//!
//! # Ordering semantics
//!
//! The sort is Kahn's algorithm with a min-heap keyed on discovery index:
//! whenever several nodes are simultaneously ready, the one discovered first
//! is emitted first. The same input graph therefore always produces the same
//! output order, which keeps flattened output diffable between runs.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::error::FlattenError;

// ---------------------------------------------------------------------------
// DependencyGraph
// ---------------------------------------------------------------------------

/// Directed dependency graph over canonical paths.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// Node paths in discovery order.
    nodes: Vec<String>,
    /// Canonical path → discovery index.
    index: HashMap<String, usize>,
    /// Edges as `(dependency, dependent)` discovery indices.
    edges: Vec<(usize, usize)>,
}

impl DependencyGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, returning its discovery index. Idempotent: a path already
    /// present keeps its original index.
    ///
    /// A file with no imports must still be added explicitly — a node with
    /// zero edges would otherwise be invisible to an edge-based sort.
    pub fn add_node(&mut self, path: &str) -> usize {
        if let Some(&idx) = self.index.get(path) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(path.to_owned());
        self.index.insert(path.to_owned(), idx);
        idx
    }

    /// Record that `dependency` must precede `dependent`.
    pub fn add_edge(&mut self, dependency: &str, dependent: &str) {
        let dep = self.add_node(dependency);
        let dependent = self.add_node(dependent);
        self.edges.push((dep, dependent));
    }

    /// Node paths in discovery order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Compute the topological order of all nodes.
    ///
    /// For every edge `(dep, dependent)`, `dep` precedes `dependent` in the
    /// result. Isolated nodes are included; the result contains each node
    /// exactly once. Ties break by discovery index.
    ///
    /// # Errors
    ///
    /// [`FlattenError::CycleDetected`] if no valid linear order exists. The
    /// error lists every discovered file in discovery order so the offending
    /// import chain can be located.
    pub fn toposort(&self) -> Result<Vec<String>, FlattenError> {
        let mut in_degree = vec![0usize; self.nodes.len()];
        let mut successors: Vec<Vec<usize>> = vec![Vec::new(); self.nodes.len()];
        for &(dep, dependent) in &self.edges {
            in_degree[dependent] += 1;
            successors[dep].push(dependent);
        }

        let mut ready: BinaryHeap<Reverse<usize>> = in_degree
            .iter()
            .enumerate()
            .filter(|&(_, &deg)| deg == 0)
            .map(|(idx, _)| Reverse(idx))
            .collect();

        let mut order = Vec::with_capacity(self.nodes.len());
        while let Some(Reverse(idx)) = ready.pop() {
            order.push(self.nodes[idx].clone());
            for &next in &successors[idx] {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    ready.push(Reverse(next));
                }
            }
        }

        if order.len() < self.nodes.len() {
            return Err(FlattenError::CycleDetected {
                files: self.nodes.clone(),
            });
        }
        Ok(order)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
