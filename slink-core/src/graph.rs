//! Graph abstraction consumed by the clustering drivers.
//!
//! Callers adapt their own graph representation by implementing [`Graph`]
//! (node enumeration plus per-node neighbor enumeration); the edge set is
//! derived from those two operations unless an implementation can enumerate
//! edges more directly. [`AdjacencyGraph`] is the batteries-included
//! implementation backed by an insertion-ordered adjacency map.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};

/// Normalizes an undirected edge so the smaller endpoint comes first.
///
/// Distance functions receive edges in this canonical orientation, so a
/// non-symmetric function still sees each pair consistently.
#[must_use]
pub fn normalize_edge<N: Ord>(u: N, v: N) -> (N, N) {
    if v < u { (v, u) } else { (u, v) }
}

/// Read-only view of an undirected graph.
///
/// Implementations supply node and neighbor enumeration; [`Graph::edges`]
/// derives a canonical edge list from them. Enumeration order must be
/// deterministic because it decides tie order among equal-weight edges
/// downstream.
///
/// # Examples
/// ```
/// use slink_core::Graph;
///
/// struct Triangle;
///
/// impl Graph for Triangle {
///     type Node = u8;
///     fn nodes(&self) -> Vec<u8> { vec![0, 1, 2] }
///     fn neighbors(&self, node: &u8) -> Vec<u8> {
///         (0..3).filter(|n| n != node).collect()
///     }
/// }
///
/// assert_eq!(Triangle.edges(), vec![(0, 1), (0, 2), (1, 2)]);
/// ```
pub trait Graph {
    /// Node value carried through clustering results.
    type Node: Clone + Eq + Hash + Ord + fmt::Debug;

    /// Enumerates every node in a deterministic order.
    fn nodes(&self) -> Vec<Self::Node>;

    /// Enumerates the neighbors of `node` in a deterministic order.
    ///
    /// Unknown nodes yield an empty list.
    fn neighbors(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Enumerates the undirected edge set.
    ///
    /// Each edge appears once, normalized so the smaller endpoint comes
    /// first. A node listed among its own neighbors is never surfaced as a
    /// self-edge. Order follows the first sighting during node/neighbor
    /// traversal.
    fn edges(&self) -> Vec<(Self::Node, Self::Node)> {
        let mut seen = HashSet::new();
        let mut edges = Vec::new();
        for node in self.nodes() {
            for neighbor in self.neighbors(&node) {
                if neighbor == node {
                    continue;
                }
                let edge = normalize_edge(node.clone(), neighbor);
                if seen.insert(edge.clone()) {
                    edges.push(edge);
                }
            }
        }
        edges
    }
}

/// Undirected graph backed by an insertion-ordered adjacency map.
///
/// Node and neighbor enumeration follow insertion order, which keeps edge
/// tie-breaking reproducible across runs.
///
/// # Examples
/// ```
/// use slink_core::{AdjacencyGraph, Graph};
///
/// let mut graph = AdjacencyGraph::new();
/// graph.add_edge("a", "b");
/// graph.add_edge("b", "c");
/// graph.add_node("d");
/// assert_eq!(graph.node_count(), 4);
/// assert_eq!(graph.edges(), vec![("a", "b"), ("b", "c")]);
/// ```
#[derive(Clone, Debug)]
pub struct AdjacencyGraph<N> {
    adjacency: IndexMap<N, IndexSet<N>>,
}

impl<N> Default for AdjacencyGraph<N> {
    fn default() -> Self {
        Self {
            adjacency: IndexMap::new(),
        }
    }
}

impl<N> AdjacencyGraph<N>
where
    N: Clone + Eq + Hash + Ord + fmt::Debug,
{
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            adjacency: IndexMap::new(),
        }
    }

    /// Registers `node`, with no neighbors, if it is not already present.
    pub fn add_node(&mut self, node: N) {
        self.adjacency.entry(node).or_default();
    }

    /// Adds the undirected edge `(u, v)`, registering both endpoints.
    pub fn add_edge(&mut self, u: N, v: N) {
        self.adjacency.entry(u.clone()).or_default().insert(v.clone());
        self.adjacency.entry(v).or_default().insert(u);
    }

    /// Returns the number of registered nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the number of distinct undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges().len()
    }

    /// Returns whether `node` is registered.
    #[must_use]
    pub fn contains_node(&self, node: &N) -> bool {
        self.adjacency.contains_key(node)
    }

    /// Returns whether the undirected edge `(u, v)` is present.
    #[must_use]
    pub fn contains_edge(&self, u: &N, v: &N) -> bool {
        u != v
            && self
                .adjacency
                .get(u)
                .is_some_and(|neighbors| neighbors.contains(v))
    }
}

impl<N> Graph for AdjacencyGraph<N>
where
    N: Clone + Eq + Hash + Ord + fmt::Debug,
{
    type Node = N;

    fn nodes(&self) -> Vec<N> {
        self.adjacency.keys().cloned().collect()
    }

    fn neighbors(&self, node: &N) -> Vec<N> {
        self.adjacency
            .get(node)
            .map(|neighbors| neighbors.iter().cloned().collect())
            .unwrap_or_default()
    }
}
