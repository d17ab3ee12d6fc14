//! Disjoint-set forest (union-find) over opaque elements.
//!
//! The forest tracks a partition of a fixed element set. Elements are
//! registered once at construction and mapped to dense integer ids; the
//! mutable state lives in flat arrays indexed by those ids. Finds use
//! iterative path compression and unions attach by rank, so any sequence of
//! `m` operations over `n` elements costs `O(m·α(n))` amortized.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use thiserror::Error;

/// Errors produced by disjoint-set forest operations.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ForestError {
    /// The element was never registered with the forest.
    #[error("element {element} is not in the forest")]
    UnknownElement {
        /// Debug rendering of the unregistered element.
        element: String,
    },
    /// An internal dense id fell outside the arena bounds.
    #[error("id {id} is out of range for a forest of {len} elements")]
    IdOutOfRange {
        /// The offending dense id.
        id: usize,
        /// Number of registered elements.
        len: usize,
    },
}

impl ForestError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> ForestErrorCode {
        match self {
            Self::UnknownElement { .. } => ForestErrorCode::UnknownElement,
            Self::IdOutOfRange { .. } => ForestErrorCode::IdOutOfRange,
        }
    }
}

/// Machine-readable error codes for [`ForestError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ForestErrorCode {
    /// The element was never registered with the forest.
    UnknownElement,
    /// An internal dense id fell outside the arena bounds.
    IdOutOfRange,
}

impl ForestErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnknownElement => "UNKNOWN_ELEMENT",
            Self::IdOutOfRange => "ID_OUT_OF_RANGE",
        }
    }
}

/// Dense-id union-find arena.
///
/// Roots are self-parented. `set_size` is tracked per root for diagnostics
/// and is only meaningful at root ids.
#[derive(Clone, Debug, Default)]
struct ForestCore {
    parent: Vec<usize>,
    rank: Vec<u8>,
    set_size: Vec<usize>,
}

impl ForestCore {
    fn make_set(&mut self) -> usize {
        let id = self.parent.len();
        self.parent.push(id);
        self.rank.push(0);
        self.set_size.push(1);
        id
    }

    fn len(&self) -> usize {
        self.parent.len()
    }

    fn check(&self, id: usize) -> Result<(), ForestError> {
        if id >= self.parent.len() {
            return Err(ForestError::IdOutOfRange {
                id,
                len: self.parent.len(),
            });
        }
        Ok(())
    }

    /// Finds the root of `id`, repointing every node on the path at it.
    fn find_set(&mut self, id: usize) -> Result<usize, ForestError> {
        self.check(id)?;

        let mut root = id;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut node = id;
        while self.parent[node] != node {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        Ok(root)
    }

    /// Merges the sets containing `x` and `y` by rank.
    ///
    /// On a rank tie the first argument's root is attached under the
    /// second's and the surviving rank increments. Unioning two members of
    /// one set leaves the structure untouched.
    fn union(&mut self, x: usize, y: usize) -> Result<(), ForestError> {
        let x_root = self.find_set(x)?;
        let y_root = self.find_set(y)?;

        if x_root == y_root {
            return Ok(());
        }

        if self.rank[x_root] > self.rank[y_root] {
            self.parent[y_root] = x_root;
            self.set_size[x_root] += self.set_size[y_root];
        } else {
            self.parent[x_root] = y_root;
            self.set_size[y_root] += self.set_size[x_root];
            if self.rank[x_root] == self.rank[y_root] {
                self.rank[y_root] = self.rank[y_root].saturating_add(1);
            }
        }

        Ok(())
    }

    fn set_size(&mut self, id: usize) -> Result<usize, ForestError> {
        let root = self.find_set(id)?;
        Ok(self.set_size[root])
    }
}

/// Disjoint-set forest over caller-supplied elements.
///
/// Registration is a one-time bijection between elements and dense ids;
/// duplicate elements in the constructor iterator are registered once. The
/// element set is fixed for the lifetime of the forest.
///
/// # Examples
/// ```
/// use slink_core::DisjointSetForest;
///
/// let mut forest = DisjointSetForest::new(["a", "b", "c"]);
/// forest.union(&"a", &"b")?;
/// assert!(forest.in_same_set(&"a", &"b")?);
/// assert!(!forest.in_same_set(&"a", &"c")?);
/// assert_eq!(forest.set_size(&"a")?, 2);
/// # Ok::<(), slink_core::ForestError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DisjointSetForest<E> {
    core: ForestCore,
    element_to_id: HashMap<E, usize>,
    id_to_element: Vec<E>,
}

impl<E> DisjointSetForest<E>
where
    E: Clone + Eq + Hash + fmt::Debug,
{
    /// Creates a forest with one singleton set per distinct element.
    pub fn new<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        let mut forest = Self {
            core: ForestCore::default(),
            element_to_id: HashMap::new(),
            id_to_element: Vec::new(),
        };
        for element in elements {
            if forest.element_to_id.contains_key(&element) {
                continue;
            }
            let id = forest.core.make_set();
            forest.element_to_id.insert(element.clone(), id);
            forest.id_to_element.push(element);
        }
        forest
    }

    /// Returns the number of registered elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.core.len()
    }

    /// Returns whether the forest holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.core.len() == 0
    }

    /// Returns whether `element` was registered at construction.
    #[must_use]
    pub fn contains(&self, element: &E) -> bool {
        self.element_to_id.contains_key(element)
    }

    fn id_of(&self, element: &E) -> Result<usize, ForestError> {
        self.element_to_id
            .get(element)
            .copied()
            .ok_or_else(|| ForestError::UnknownElement {
                element: format!("{element:?}"),
            })
    }

    /// Finds the representative element of the set containing `element`.
    ///
    /// # Errors
    /// Returns [`ForestError::UnknownElement`] for unregistered elements.
    pub fn find_set(&mut self, element: &E) -> Result<&E, ForestError> {
        let id = self.id_of(element)?;
        let root = self.core.find_set(id)?;
        Ok(&self.id_to_element[root])
    }

    /// Merges the set containing `x` with the set containing `y`.
    ///
    /// A no-op when both already share a set.
    ///
    /// # Errors
    /// Returns [`ForestError::UnknownElement`] for unregistered elements.
    pub fn union(&mut self, x: &E, y: &E) -> Result<(), ForestError> {
        let x_id = self.id_of(x)?;
        let y_id = self.id_of(y)?;
        self.core.union(x_id, y_id)
    }

    /// Returns whether `x` and `y` currently share a set.
    ///
    /// # Errors
    /// Returns [`ForestError::UnknownElement`] for unregistered elements.
    pub fn in_same_set(&mut self, x: &E, y: &E) -> Result<bool, ForestError> {
        let x_id = self.id_of(x)?;
        let y_id = self.id_of(y)?;
        Ok(self.core.find_set(x_id)? == self.core.find_set(y_id)?)
    }

    /// Returns the size of the set containing `element`.
    ///
    /// # Errors
    /// Returns [`ForestError::UnknownElement`] for unregistered elements.
    pub fn set_size(&mut self, element: &E) -> Result<usize, ForestError> {
        let id = self.id_of(element)?;
        self.core.set_size(id)
    }
}
