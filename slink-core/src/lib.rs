//! Single-linkage clustering engine.
//!
//! Partitions an undirected, edge-weighted graph into exactly `k` connected
//! clusters by merging nearest components first. The engine is built from
//! three pieces:
//!
//! - [`DisjointSetForest`] — a union-find structure with iterative path
//!   compression and union by rank, giving near-constant amortized set
//!   operations.
//! - [`Graph`] — the adapter seam: callers implement node and neighbor
//!   enumeration for their own representation, and the edge set is derived
//!   in canonical (sorted-pair, self-loop-free) form. [`AdjacencyGraph`] is
//!   the ready-made insertion-ordered implementation.
//! - [`slc`] — the Kruskal-style greedy driver, with [`cluster_at_level`] as
//!   the thresholded companion.
//!
//! Clustering is synchronous and batch-oriented: each call builds its own
//! forest, runs to completion or fails with a [`ClusterError`], and returns
//! a [`Partition`] covering every input node exactly once.

mod forest;
mod graph;
mod linkage;
mod partition;

pub use crate::{
    forest::{DisjointSetForest, ForestError, ForestErrorCode},
    graph::{AdjacencyGraph, Graph, normalize_edge},
    linkage::{ClusterError, ClusterErrorCode, cluster_at_level, slc},
    partition::Partition,
};
