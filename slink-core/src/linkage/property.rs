//! Property-based tests for the clustering drivers and the forest.
//!
//! Covers the invariants that hold for every input rather than pinned
//! examples: partition totality, exact cluster counts, refinement between
//! consecutive `k`, and order-independence of union-find partitions.

use std::collections::{BTreeSet, HashMap};

use proptest::prelude::*;

use crate::forest::DisjointSetForest;
use crate::graph::{AdjacencyGraph, Graph, normalize_edge};
use crate::partition::Partition;

use super::{ClusterError, slc};

/// A random undirected graph as a node count plus raw edge endpoints.
///
/// Endpoints may repeat or self-loop; the adjacency graph normalizes them.
fn arb_graph() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (2usize..12).prop_flat_map(|n| {
        (
            Just(n),
            proptest::collection::vec((0..n, 0..n), 0..30),
        )
    })
}

fn build_graph(n: usize, raw_edges: &[(usize, usize)]) -> AdjacencyGraph<usize> {
    let mut graph = AdjacencyGraph::new();
    for node in 0..n {
        graph.add_node(node);
    }
    for &(u, v) in raw_edges {
        if u != v {
            graph.add_edge(u, v);
        }
    }
    graph
}

/// Strictly injective weights: each normalized edge maps to its position in
/// the enumeration order.
fn injective_distance(graph: &AdjacencyGraph<usize>) -> impl Fn(&usize, &usize) -> f64 {
    let ranks: HashMap<(usize, usize), usize> = graph
        .edges()
        .into_iter()
        .enumerate()
        .map(|(rank, edge)| (edge, rank))
        .collect();
    move |u: &usize, v: &usize| {
        let edge = normalize_edge(*u, *v);
        ranks.get(&edge).map_or(f64::MAX, |rank| *rank as f64)
    }
}

/// Deterministic tie-heavy weights.
fn tie_heavy_distance(u: &usize, v: &usize) -> f64 {
    let (a, b) = normalize_edge(*u, *v);
    ((a * 31 + b * 17) % 3) as f64
}

/// Counts the distinct sets a forest currently partitions `0..n` into.
fn distinct_set_count(forest: &mut DisjointSetForest<usize>, n: usize) -> usize {
    let mut roots = BTreeSet::new();
    for node in 0..n {
        roots.insert(*forest.find_set(&node).expect("all nodes are registered"));
    }
    roots.len()
}

/// Counts connected components by flooding every edge through a forest.
fn component_count(n: usize, graph: &AdjacencyGraph<usize>) -> usize {
    let mut forest = DisjointSetForest::new(0..n);
    for (u, v) in graph.edges() {
        forest.union(&u, &v).expect("all nodes are registered");
    }
    distinct_set_count(&mut forest, n)
}

fn assert_total(partition: &Partition<usize>, n: usize) {
    let mut seen = BTreeSet::new();
    for cluster in partition {
        assert!(!cluster.is_empty(), "clusters must be non-empty");
        for node in cluster {
            assert!(seen.insert(*node), "node {node} appears in two clusters");
        }
    }
    assert_eq!(seen, (0..n).collect::<BTreeSet<_>>());
}

/// Checks that every cluster of `coarse` is a union of clusters of `fine`.
fn assert_refines(fine: &Partition<usize>, coarse: &Partition<usize>) {
    for cluster in fine {
        let first = cluster.first().expect("clusters are non-empty");
        let owner = coarse
            .cluster_containing(first)
            .expect("coarse partition covers every node");
        for node in cluster {
            assert!(
                owner.contains(node),
                "cluster containing {first} splits across coarse clusters at {node}"
            );
        }
    }
}

/// Same-set truth table over every node pair.
fn same_set_table(forest: &mut DisjointSetForest<usize>, n: usize) -> Vec<bool> {
    let mut table = Vec::with_capacity(n * n);
    for x in 0..n {
        for y in 0..n {
            table.push(forest.in_same_set(&x, &y).expect("registered"));
        }
    }
    table
}

proptest! {
    /// Successful runs return exactly `k` non-empty clusters covering every
    /// node once; failures are always insufficient connectivity, and they
    /// happen exactly when `k` undercuts the component count.
    #[test]
    fn slc_is_total_and_exact((n, raw_edges) in arb_graph()) {
        let graph = build_graph(n, &raw_edges);
        let components = component_count(n, &graph);

        for k in 1..=n {
            match slc(&graph, tie_heavy_distance, k) {
                Ok(partition) => {
                    prop_assert!(k >= components);
                    prop_assert_eq!(partition.cluster_count(), k);
                    assert_total(&partition, n);
                }
                Err(ClusterError::InsufficientConnectivity { achieved, requested }) => {
                    prop_assert!(k < components);
                    prop_assert_eq!(requested, k);
                    prop_assert!(achieved > k);
                }
                Err(other) => prop_assert!(false, "unexpected error: {other}"),
            }
        }
    }

    /// With injective weights the `k`-clustering refines the
    /// `(k-1)`-clustering: single linkage only ever merges, never splits.
    /// Walking `k` downwards, failures start once `k` drops below the
    /// component count; every success must refine the previous one.
    #[test]
    fn slc_partitions_refine_as_k_shrinks((n, raw_edges) in arb_graph()) {
        let graph = build_graph(n, &raw_edges);
        let distance = injective_distance(&graph);
        let components = component_count(n, &graph);

        let mut previous: Option<Partition<usize>> = None;
        for k in (1..=n).rev() {
            match slc(&graph, &distance, k) {
                Ok(partition) => {
                    prop_assert!(k >= components);
                    if let Some(finer) = &previous {
                        assert_refines(finer, &partition);
                    }
                    previous = Some(partition);
                }
                Err(ClusterError::InsufficientConnectivity { .. }) => {
                    prop_assert!(k < components);
                }
                Err(other) => prop_assert!(false, "unexpected error: {other}"),
            }
        }
    }

    /// Replaying the greedy merge edge by edge, the cluster count is
    /// non-increasing and drops by at most one per edge (by exactly one
    /// when the edge bridges two sets). It bottoms out at the component
    /// count, the smallest `k` that `slc` can still satisfy.
    #[test]
    fn greedy_merges_shrink_cluster_count_by_at_most_one((n, raw_edges) in arb_graph()) {
        let graph = build_graph(n, &raw_edges);
        let mut edges: Vec<(f64, usize, usize)> = graph
            .edges()
            .into_iter()
            .map(|(u, v)| (tie_heavy_distance(&u, &v), u, v))
            .collect();
        edges.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut forest = DisjointSetForest::new(0..n);
        let mut clusters = n;
        for (_, u, v) in &edges {
            let bridges = !forest.in_same_set(u, v).expect("registered");
            forest.union(u, v).expect("registered");
            let current = distinct_set_count(&mut forest, n);
            prop_assert!(current <= clusters);
            prop_assert_eq!(clusters - current, usize::from(bridges));
            clusters = current;
        }
        prop_assert_eq!(clusters, component_count(n, &graph));

        let partition = slc(&graph, tie_heavy_distance, clusters)
            .expect("k at the component count is always reachable");
        prop_assert_eq!(partition.cluster_count(), clusters);
    }

    /// The partition induced by a union sequence is independent of the
    /// order the unions are applied in.
    #[test]
    fn union_order_does_not_change_the_partition(
        (n, unions, shuffled) in (2usize..10).prop_flat_map(|n| {
            proptest::collection::vec((0..n, 0..n), 0..20).prop_flat_map(move |unions| {
                (Just(n), Just(unions.clone()), Just(unions).prop_shuffle())
            })
        })
    ) {
        let mut in_order = DisjointSetForest::new(0..n);
        for (x, y) in &unions {
            in_order.union(x, y).expect("registered");
        }

        let mut reordered = DisjointSetForest::new(0..n);
        for (x, y) in &shuffled {
            reordered.union(x, y).expect("registered");
        }

        prop_assert_eq!(
            same_set_table(&mut in_order, n),
            same_set_table(&mut reordered, n)
        );
    }

    /// Unioning elements already in one set changes nothing observable.
    #[test]
    fn repeated_unions_are_idempotent(
        (n, unions) in (2usize..10).prop_flat_map(|n| {
            (Just(n), proptest::collection::vec((0..n, 0..n), 0..20))
        })
    ) {
        let mut once = DisjointSetForest::new(0..n);
        for (x, y) in &unions {
            once.union(x, y).expect("registered");
        }

        let mut twice = DisjointSetForest::new(0..n);
        for (x, y) in &unions {
            twice.union(x, y).expect("registered");
            twice.union(x, y).expect("registered");
        }

        prop_assert_eq!(same_set_table(&mut once, n), same_set_table(&mut twice, n));
        for node in 0..n {
            prop_assert_eq!(
                once.set_size(&node).expect("registered"),
                twice.set_size(&node).expect("registered")
            );
        }
    }
}
