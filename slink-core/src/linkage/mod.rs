//! Single-linkage clustering drivers.
//!
//! [`slc`] is Kruskal's minimum-spanning-forest construction truncated at
//! `k` components: edges are sorted by caller-supplied distance and merged
//! greedily until exactly `k` clusters remain. Because each union of two
//! distinct components reduces the live cluster count by exactly one, the
//! early exit at `k` is exact and the result is the classical single-linkage
//! partition.
//!
//! [`cluster_at_level`] is the thresholded variant: it keeps every edge at
//! or above a weight level and reports the connected components of what
//! survives.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::forest::{DisjointSetForest, ForestError};
use crate::graph::Graph;
use crate::partition::Partition;

/// Errors returned by the clustering drivers.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ClusterError {
    /// The requested cluster count was zero.
    #[error("k must be positive (got {got})")]
    InvalidClusterCount {
        /// The invalid cluster count supplied by the caller.
        got: usize,
    },
    /// The requested cluster count exceeded the node count.
    #[error("k is {got} but the graph has only {nodes} nodes")]
    ClusterCountExceedsNodes {
        /// The requested cluster count.
        got: usize,
        /// Number of nodes in the graph.
        nodes: usize,
    },
    /// The edge set cannot reduce the graph to the requested cluster count.
    #[error("graph connectivity reaches {achieved} clusters but {requested} were requested")]
    InsufficientConnectivity {
        /// The smallest cluster count the edge set can reach.
        achieved: usize,
        /// The requested cluster count.
        requested: usize,
    },
    /// The distance function produced a non-finite or negative weight.
    #[error("edge ({left}, {right}) has invalid weight {weight}")]
    InvalidWeight {
        /// Debug rendering of the smaller endpoint.
        left: String,
        /// Debug rendering of the larger endpoint.
        right: String,
        /// The offending weight.
        weight: f64,
    },
    /// A forest operation failed while running the driver.
    #[error("disjoint-set forest failed: {0}")]
    Forest(#[from] ForestError),
}

impl ClusterError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> ClusterErrorCode {
        match self {
            Self::InvalidClusterCount { .. } => ClusterErrorCode::InvalidClusterCount,
            Self::ClusterCountExceedsNodes { .. } => ClusterErrorCode::ClusterCountExceedsNodes,
            Self::InsufficientConnectivity { .. } => ClusterErrorCode::InsufficientConnectivity,
            Self::InvalidWeight { .. } => ClusterErrorCode::InvalidWeight,
            Self::Forest(_) => ClusterErrorCode::Forest,
        }
    }
}

/// Machine-readable error codes for [`ClusterError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ClusterErrorCode {
    /// The requested cluster count was zero.
    InvalidClusterCount,
    /// The requested cluster count exceeded the node count.
    ClusterCountExceedsNodes,
    /// The edge set cannot reduce the graph to the requested cluster count.
    InsufficientConnectivity,
    /// The distance function produced a non-finite or negative weight.
    InvalidWeight,
    /// A forest operation failed while running the driver.
    Forest,
}

impl ClusterErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidClusterCount => "INVALID_CLUSTER_COUNT",
            Self::ClusterCountExceedsNodes => "CLUSTER_COUNT_EXCEEDS_NODES",
            Self::InsufficientConnectivity => "INSUFFICIENT_CONNECTIVITY",
            Self::InvalidWeight => "INVALID_WEIGHT",
            Self::Forest => "FOREST",
        }
    }
}

/// Performs single-linkage clustering into exactly `k` clusters.
///
/// `distance` is evaluated once per edge, always on the normalized pair
/// (smaller endpoint first), and must return a finite, non-negative weight.
/// Equal-weight edges are merged in the graph's enumeration order; callers
/// wanting one specific partition among the valid single-linkage results
/// should supply injective weights.
///
/// A zero-node graph yields the empty partition.
///
/// # Errors
/// Returns [`ClusterError::InvalidClusterCount`] when `k == 0`,
/// [`ClusterError::ClusterCountExceedsNodes`] when `k` exceeds the node
/// count, [`ClusterError::InvalidWeight`] when `distance` yields a
/// non-finite or negative weight, and
/// [`ClusterError::InsufficientConnectivity`] when the edge set cannot merge
/// the graph down to `k` clusters.
///
/// # Examples
/// ```
/// use std::collections::BTreeSet;
/// use slink_core::{AdjacencyGraph, Partition, slc};
///
/// let mut graph = AdjacencyGraph::new();
/// graph.add_edge("a", "b");
/// graph.add_edge("b", "c");
/// graph.add_edge("c", "d");
///
/// let distance = |u: &&str, v: &&str| match (*u, *v) {
///     ("a", "b") => 1.0,
///     ("b", "c") => 2.0,
///     _ => 3.0,
/// };
///
/// let partition = slc(&graph, distance, 2)?;
/// assert_eq!(
///     partition,
///     Partition::from_clusters([
///         BTreeSet::from(["a", "b", "c"]),
///         BTreeSet::from(["d"]),
///     ]),
/// );
/// # Ok::<(), slink_core::ClusterError>(())
/// ```
#[instrument(level = "debug", skip(graph, distance))]
pub fn slc<G, D>(graph: &G, distance: D, k: usize) -> Result<Partition<G::Node>, ClusterError>
where
    G: Graph,
    D: Fn(&G::Node, &G::Node) -> f64,
{
    let nodes = graph.nodes();
    if nodes.is_empty() {
        return Ok(Partition::empty());
    }
    if k < 1 {
        return Err(ClusterError::InvalidClusterCount { got: k });
    }
    if k > nodes.len() {
        return Err(ClusterError::ClusterCountExceedsNodes {
            got: k,
            nodes: nodes.len(),
        });
    }

    let edges = graph.edges();
    if edges.is_empty() && k != nodes.len() {
        return Err(ClusterError::InsufficientConnectivity {
            achieved: nodes.len(),
            requested: k,
        });
    }

    let mut weighted = Vec::with_capacity(edges.len());
    for (left, right) in edges {
        let weight = distance(&left, &right);
        if !weight.is_finite() || weight < 0.0 {
            return Err(ClusterError::InvalidWeight {
                left: format!("{left:?}"),
                right: format!("{right:?}"),
                weight,
            });
        }
        weighted.push((weight, left, right));
    }
    // Stable sort: equal weights keep the graph's enumeration order.
    weighted.sort_by(|a, b| a.0.total_cmp(&b.0));
    debug!(
        nodes = nodes.len(),
        edges = weighted.len(),
        k,
        "edges sorted, starting greedy merge"
    );

    let mut forest = DisjointSetForest::new(nodes.iter().cloned());
    let mut clusters = forest.len();
    for (_, left, right) in &weighted {
        if clusters == k {
            break;
        }
        if !forest.in_same_set(left, right)? {
            forest.union(left, right)?;
            clusters -= 1;
        }
    }

    if clusters > k {
        return Err(ClusterError::InsufficientConnectivity {
            achieved: clusters,
            requested: k,
        });
    }
    debug!(clusters, "greedy merge complete");

    Ok(read_partition(&mut forest, &nodes)?)
}

/// Partitions a graph into the connected components that remain when every
/// edge with weight below `level` is cut.
///
/// Edges at or above `level` keep their endpoints together; everything else
/// is severed. A zero-node graph yields the empty partition. Weights are
/// used only for the threshold comparison, so no validation is applied.
///
/// # Errors
/// Returns [`ClusterError::Forest`] if a forest operation fails, which the
/// driver's construction discipline prevents in practice.
///
/// # Examples
/// ```
/// use slink_core::{AdjacencyGraph, cluster_at_level};
///
/// let mut graph = AdjacencyGraph::new();
/// graph.add_edge(1, 2);
/// graph.add_edge(2, 3);
///
/// let weights = |u: &i32, v: &i32| f64::from(u + v);
/// // (1,2) weighs 3.0 and is cut; (2,3) weighs 5.0 and survives.
/// let partition = cluster_at_level(&graph, weights, 4.0)?;
/// assert_eq!(partition.cluster_count(), 2);
/// assert!(partition.in_same_cluster(&2, &3));
/// # Ok::<(), slink_core::ClusterError>(())
/// ```
#[instrument(level = "debug", skip(graph, weights))]
pub fn cluster_at_level<G, W>(
    graph: &G,
    weights: W,
    level: f64,
) -> Result<Partition<G::Node>, ClusterError>
where
    G: Graph,
    W: Fn(&G::Node, &G::Node) -> f64,
{
    let nodes = graph.nodes();
    if nodes.is_empty() {
        return Ok(Partition::empty());
    }

    let mut forest = DisjointSetForest::new(nodes.iter().cloned());
    for (left, right) in graph.edges() {
        if weights(&left, &right) >= level {
            forest.union(&left, &right)?;
        }
    }

    Ok(read_partition(&mut forest, &nodes)?)
}

/// Groups every node by its forest representative.
fn read_partition<N>(
    forest: &mut DisjointSetForest<N>,
    nodes: &[N],
) -> Result<Partition<N>, ForestError>
where
    N: Clone + Eq + Hash + Ord + fmt::Debug,
{
    let mut groups: IndexMap<N, BTreeSet<N>> = IndexMap::new();
    for node in nodes {
        let representative = forest.find_set(node)?.clone();
        groups
            .entry(representative)
            .or_default()
            .insert(node.clone());
    }
    Ok(Partition::from_clusters(groups.into_values()))
}

#[cfg(test)]
mod property;
