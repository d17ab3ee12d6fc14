//! Result type for clustering operations.

use std::collections::BTreeSet;

/// A partition of graph nodes into disjoint, non-empty clusters.
///
/// Clusters are stored in canonical order (sorted by their smallest member),
/// so two partitions with the same grouping compare equal regardless of how
/// their clusters were produced. Cluster identity carries no meaning beyond
/// the grouping itself.
///
/// # Examples
/// ```
/// use std::collections::BTreeSet;
/// use slink_core::Partition;
///
/// let partition = Partition::from_clusters([
///     BTreeSet::from(["d"]),
///     BTreeSet::from(["a", "b", "c"]),
/// ]);
/// assert_eq!(partition.cluster_count(), 2);
/// assert_eq!(partition.len(), 4);
/// assert!(partition.in_same_cluster(&"a", &"c"));
/// assert!(!partition.in_same_cluster(&"a", &"d"));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Partition<N: Ord> {
    clusters: Vec<BTreeSet<N>>,
}

impl<N: Ord> Partition<N> {
    /// Builds a partition from clusters, dropping empty ones and sorting the
    /// rest by smallest member.
    ///
    /// The caller is responsible for supplying disjoint clusters; the driver
    /// guarantees this by grouping nodes by their forest representative.
    #[must_use]
    pub fn from_clusters<I>(clusters: I) -> Self
    where
        I: IntoIterator<Item = BTreeSet<N>>,
    {
        let mut clusters: Vec<_> = clusters
            .into_iter()
            .filter(|cluster| !cluster.is_empty())
            .collect();
        clusters.sort_by(|a, b| a.first().cmp(&b.first()));
        Self { clusters }
    }

    /// Returns the partition of the empty node set.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            clusters: Vec::new(),
        }
    }

    /// Returns the clusters in canonical order.
    #[must_use]
    pub fn clusters(&self) -> &[BTreeSet<N>] {
        &self.clusters
    }

    /// Returns the number of clusters.
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    /// Returns the total number of nodes across all clusters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clusters.iter().map(BTreeSet::len).sum()
    }

    /// Returns whether the partition covers no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Returns the cluster containing `node`, if any.
    #[must_use]
    pub fn cluster_containing(&self, node: &N) -> Option<&BTreeSet<N>> {
        self.clusters.iter().find(|cluster| cluster.contains(node))
    }

    /// Returns whether `x` and `y` landed in the same cluster.
    ///
    /// `false` when either node is absent from the partition.
    #[must_use]
    pub fn in_same_cluster(&self, x: &N, y: &N) -> bool {
        self.cluster_containing(x)
            .is_some_and(|cluster| cluster.contains(y))
    }

    /// Iterates over the clusters in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &BTreeSet<N>> {
        self.clusters.iter()
    }
}

impl<N: Ord> Default for Partition<N> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a, N: Ord> IntoIterator for &'a Partition<N> {
    type Item = &'a BTreeSet<N>;
    type IntoIter = std::slice::Iter<'a, BTreeSet<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.clusters.iter()
    }
}
